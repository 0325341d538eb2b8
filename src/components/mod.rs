pub mod add_sentence_dialog;
pub mod sentence_card;
pub mod settings_dialog;
pub mod ui;
