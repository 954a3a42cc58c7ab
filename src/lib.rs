pub mod audio;
pub mod components;
pub mod config;
pub mod constants;
pub mod events;
pub mod ghost;
pub mod highscore;
pub mod input;
pub mod level;
pub mod motion;
pub mod player;
pub mod power;
pub mod render;
pub mod session;
pub mod terminal;
