pub mod pretty_display;
