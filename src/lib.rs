// topicprep: corpus preparation and topic assignment for topic models
//
// This is the library root. Each module corresponds to a stage of the
// corpus-to-bag-of-words pipeline, plus the downstream topic assigner.

pub mod bow;
pub mod config;
pub mod corpus;
pub mod output;
pub mod partition;
pub mod pipeline;
pub mod status;
pub mod topics;
pub mod vocab;
