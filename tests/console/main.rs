mod edit_screens;
mod lifecycle;
mod list_screens;
