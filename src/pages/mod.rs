pub mod create_post;
pub mod home;
pub mod login;
pub mod post_detail;
pub mod post_list;
pub mod register;
