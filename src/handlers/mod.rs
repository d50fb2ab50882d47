pub mod matches;
