mod helpers;

mod client;
mod sprints;

mod members {
    mod delete;
    mod get;
    mod log_in;
    mod log_out;
    mod sign_up;
    mod update;
}

mod projects {
    mod delete;
    mod list;
    mod new;
    mod update;
}

mod tasks {
    mod crud;
}
