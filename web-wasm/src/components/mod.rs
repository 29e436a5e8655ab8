//! UIコンポーネント

pub mod action_buttons;
pub mod analyzing;
pub mod header;
pub mod result_panel;
pub mod selected_file;
pub mod toast_list;
pub mod upload_area;
