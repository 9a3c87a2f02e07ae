//! Test generators — `StoryGenerator` doubles for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use storyweave_core::generation::{
    GenerationError, GenerationReply, GenerationRequest, StoryGenerator,
};
use tokio::sync::{Notify, Semaphore};

/// Builds a reply without a continuity token.
#[must_use]
pub fn story_reply(narrative_so_far: &str, ai_continuation: &str) -> GenerationReply {
    GenerationReply {
        narrative_so_far: narrative_so_far.to_owned(),
        ai_continuation: ai_continuation.to_owned(),
        session_token: None,
    }
}

/// A call received by one of the test generators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratorCall {
    /// `start_story` was called.
    Start(GenerationRequest),
    /// `continue_story` was called.
    Continue(GenerationRequest),
}

/// A generator that answers from a queue of scripted results and records
/// every request. Once the script runs out it fails like an unreachable
/// backend.
#[derive(Debug)]
pub struct ScriptedStoryGenerator {
    script: Mutex<VecDeque<Result<GenerationReply, GenerationError>>>,
    calls: Mutex<Vec<GeneratorCall>>,
}

impl ScriptedStoryGenerator {
    /// Create a generator that returns `script` in order, one entry per call.
    #[must_use]
    pub fn new(script: Vec<Result<GenerationReply, GenerationError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Returns a snapshot of all calls received so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn calls(&self) -> Vec<GeneratorCall> {
        self.calls.lock().unwrap().clone()
    }

    fn answer(&self, call: GeneratorCall) -> Result<GenerationReply, GenerationError> {
        self.calls.lock().unwrap().push(call);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GenerationError::NetworkOrServer("script exhausted".into())))
    }
}

#[async_trait]
impl StoryGenerator for ScriptedStoryGenerator {
    async fn start_story(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationReply, GenerationError> {
        self.answer(GeneratorCall::Start(request.clone()))
    }

    async fn continue_story(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationReply, GenerationError> {
        self.answer(GeneratorCall::Continue(request.clone()))
    }
}

/// A generator that fails every call with the configured error.
#[derive(Debug)]
pub struct FailingStoryGenerator {
    error: GenerationError,
}

impl FailingStoryGenerator {
    /// Fails every call as an unreachable backend.
    #[must_use]
    pub fn unreachable() -> Self {
        Self {
            error: GenerationError::NetworkOrServer("connection refused".into()),
        }
    }

    /// Fails every call as a backend that returns an incomplete body.
    #[must_use]
    pub fn malformed() -> Self {
        Self {
            error: GenerationError::MalformedResponse("missing field `ai_part`".into()),
        }
    }
}

#[async_trait]
impl StoryGenerator for FailingStoryGenerator {
    async fn start_story(
        &self,
        _request: &GenerationRequest,
    ) -> Result<GenerationReply, GenerationError> {
        Err(self.error.clone())
    }

    async fn continue_story(
        &self,
        _request: &GenerationRequest,
    ) -> Result<GenerationReply, GenerationError> {
        Err(self.error.clone())
    }
}

/// A generator that holds every call open until the test releases it, so a
/// request can be observed while it is still in flight.
#[derive(Debug)]
pub struct GatedStoryGenerator {
    reply: GenerationReply,
    gate: Semaphore,
    entered: Notify,
    calls: Mutex<Vec<GeneratorCall>>,
}

impl GatedStoryGenerator {
    /// Create a gated generator that answers every released call with `reply`.
    #[must_use]
    pub fn new(reply: GenerationReply) -> Self {
        Self {
            reply,
            gate: Semaphore::new(0),
            entered: Notify::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Lets one held call complete.
    pub fn release(&self) {
        self.gate.add_permits(1);
    }

    /// Waits until a call has reached the generator.
    pub async fn wait_until_called(&self) {
        self.entered.notified().await;
    }

    /// Returns a snapshot of all calls received so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn calls(&self) -> Vec<GeneratorCall> {
        self.calls.lock().unwrap().clone()
    }

    async fn hold(&self, call: GeneratorCall) -> Result<GenerationReply, GenerationError> {
        self.calls.lock().unwrap().push(call);
        self.entered.notify_one();
        let permit = self
            .gate
            .acquire()
            .await
            .map_err(|e| GenerationError::NetworkOrServer(e.to_string()))?;
        permit.forget();
        Ok(self.reply.clone())
    }
}

#[async_trait]
impl StoryGenerator for GatedStoryGenerator {
    async fn start_story(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationReply, GenerationError> {
        self.hold(GeneratorCall::Start(request.clone())).await
    }

    async fn continue_story(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationReply, GenerationError> {
        self.hold(GeneratorCall::Continue(request.clone())).await
    }
}
