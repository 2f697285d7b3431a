// ABOUTME: Helper modules for vitalis-cli
// ABOUTME: Output formatting shared by every command

pub mod display;
