pub mod audio;
pub mod cloning;
pub mod merge;
pub mod storage;
pub mod voice_clone;
