pub mod debug;
pub mod devices;
pub mod extensions;
pub mod instance;
pub mod layers;
pub mod queues;
