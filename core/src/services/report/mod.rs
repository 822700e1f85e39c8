//! Status-count reporting over the message store

mod service;


pub use service::ReportService;
