use crate::{
    error::{music::MusicError, node::NodeError},
    model::session::{EnqueueOutcome, SkipOutcome},
    node::MockAudioNode,
    service::test::{record_plays, session, track},
};

mod advance;
mod clear;
mod enqueue;
mod pause_resume;
mod remove;
mod skip;
mod tick;
mod voice;
