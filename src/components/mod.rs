pub mod nav_bar;
pub mod post_card;
pub mod score_badge;
pub mod tag_picker;
