pub mod canvas;
pub mod card_grid;
pub mod file_drop;
pub mod link;
pub mod navbar;
pub mod preview_card;
pub mod spinner;
pub mod toast;
pub mod top_sheet;
