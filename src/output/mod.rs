//! Result assembly and report rendering

pub mod report;
pub mod formatter;
