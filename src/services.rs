pub mod projector;
