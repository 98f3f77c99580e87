pub mod header;
pub mod overlay;
pub mod readout;
pub mod sidebar;
pub mod status_bar;
