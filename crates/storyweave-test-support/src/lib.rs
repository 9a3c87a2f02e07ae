//! Shared test doubles and utilities for the Storyweave engine.

mod generator;

pub use generator::{
    FailingStoryGenerator, GatedStoryGenerator, GeneratorCall, ScriptedStoryGenerator,
    story_reply,
};
