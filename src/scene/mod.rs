//! Render requests: the rig file and the validated animation built from it.

pub mod animation;
pub mod rig;
