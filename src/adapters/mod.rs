pub mod pagerduty;
pub mod slack;
