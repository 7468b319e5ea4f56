//! The provisioning steps, in the order the provisioner runs them.

pub mod dotfiles;
pub mod editor;
pub mod hostname;
pub mod packages;
pub mod tools;
