#![allow(dead_code)]

pub mod loopback;
pub mod raincast_env;
