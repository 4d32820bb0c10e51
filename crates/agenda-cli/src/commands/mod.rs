pub mod add;
pub mod delete;
pub mod edit;
pub mod import;
pub mod list;
pub mod project;
pub mod stats;
pub mod status;
pub mod view;
pub mod watch;
