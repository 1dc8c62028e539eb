//! Command execution for the Elm-style architecture
//!
//! The runtime owns the model and the only `update` call site. Commands
//! run on short-lived worker threads that own copies of what they need and
//! report back through a channel; workers never touch the model.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::commands::{Cmd, DebounceLane, GatewayRequest};
use crate::gateway::{fallback_creative_prompts, Gateway};
use crate::messages::{AssistMsg, IllustrationMsg, Msg, SpellMsg, SuggestionMsg};
use crate::model::AppModel;
use crate::update::update;

/// How often `wait_idle` re-checks the worker count
const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Decrements the in-flight count when a worker finishes, even on panic
struct InFlightGuard(Arc<AtomicUsize>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

pub struct Runtime {
    pub model: AppModel,
    gateway: Arc<dyn Gateway>,
    msg_tx: Sender<Msg>,
    msg_rx: Receiver<Msg>,
    in_flight: Arc<AtomicUsize>,
}

impl Runtime {
    pub fn new(model: AppModel, gateway: Arc<dyn Gateway>) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        Self {
            model,
            gateway,
            msg_tx,
            msg_rx,
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Run one message through `update` and execute the resulting command
    pub fn dispatch(&mut self, msg: Msg) {
        if let Some(cmd) = update(&mut self.model, msg) {
            self.process_cmd(cmd);
        }
    }

    /// Workers still running
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    fn process_cmd(&self, cmd: Cmd) {
        match cmd {
            Cmd::None => {}
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd);
                }
            }
            Cmd::Debounce {
                lane,
                revision,
                delay_ms,
            } => {
                self.spawn_worker(move || {
                    std::thread::sleep(Duration::from_millis(delay_ms));
                    match lane {
                        DebounceLane::Suggestion => {
                            Msg::Suggestion(SuggestionMsg::AnalysisReady { revision })
                        }
                        DebounceLane::Spellcheck => Msg::Spell(SpellMsg::CheckReady { revision }),
                    }
                });
            }
            Cmd::CallGateway(request) => {
                let gateway = Arc::clone(&self.gateway);
                self.spawn_worker(move || execute(gateway.as_ref(), request));
            }
        }
    }

    fn spawn_worker<F>(&self, work: F)
    where
        F: FnOnce() -> Msg + Send + 'static,
    {
        let tx = self.msg_tx.clone();
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        let guard = InFlightGuard(Arc::clone(&self.in_flight));
        std::thread::spawn(move || {
            let _guard = guard;
            let _ = tx.send(work());
        });
    }

    /// Apply every completion that has already arrived. Returns how many.
    pub fn process_async_messages(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.dispatch(msg);
            processed += 1;
        }
        processed
    }

    /// Keep processing completions until `done` holds for the model.
    ///
    /// Debounce timers may still be running when this returns.
    pub fn wait_until(&mut self, timeout: Duration, done: impl Fn(&AppModel) -> bool) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            self.process_async_messages();
            if done(&self.model) {
                return true;
            }
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            match self
                .msg_rx
                .recv_timeout(IDLE_POLL_INTERVAL.min(deadline - now))
            {
                Ok(msg) => self.dispatch(msg),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => return done(&self.model),
            }
        }
    }

    /// Keep processing completions until no worker is running.
    ///
    /// Returns false if `timeout` elapsed first.
    pub fn wait_idle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            // Workers send before they decrement, so an idle count observed
            // before draining means nothing is left to arrive
            let idle = self.in_flight() == 0;
            let processed = self.process_async_messages();
            if idle && processed == 0 {
                return true;
            }
            if processed > 0 {
                continue;
            }

            let now = Instant::now();
            if now >= deadline {
                tracing::warn!("Runtime still busy after {:?}", timeout);
                return false;
            }
            match self
                .msg_rx
                .recv_timeout(IDLE_POLL_INTERVAL.min(deadline - now))
            {
                Ok(msg) => self.dispatch(msg),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => return true,
            }
        }
    }
}

/// Perform one backend call and wrap the outcome as a completion message.
///
/// Failures of background lanes become sentinels; text-producing calls
/// carry the error through so the update layer can report it.
pub fn execute(gateway: &dyn Gateway, request: GatewayRequest) -> Msg {
    match request {
        GatewayRequest::Draft {
            id,
            prompt,
            attachments,
        } => Msg::Assist(AssistMsg::DraftCompleted {
            id,
            result: gateway.generate_draft(&prompt, &attachments),
        }),

        GatewayRequest::Transform {
            id,
            text,
            instruction,
        } => Msg::Assist(AssistMsg::TransformCompleted {
            id,
            result: gateway.transform_span(&text, &instruction),
        }),

        GatewayRequest::Rephrase { id, text } => {
            let options = gateway.rephrase_options(&text).unwrap_or_else(|e| {
                tracing::warn!("Rephrase request failed: {}", e);
                Vec::new()
            });
            Msg::Assist(AssistMsg::RephraseCompleted { id, options })
        }

        GatewayRequest::Suggestion { revision, text } => {
            let suggestion = gateway.proactive_suggestion(&text).unwrap_or_else(|e| {
                tracing::warn!("Proactive analysis failed: {}", e);
                None
            });
            Msg::Suggestion(SuggestionMsg::AnalysisCompleted {
                revision,
                suggestion,
            })
        }

        GatewayRequest::Spelling { revision, text } => {
            let errors = gateway.check_spelling(&text).unwrap_or_else(|e| {
                tracing::warn!("Spellcheck failed: {}", e);
                Vec::new()
            });
            Msg::Spell(SpellMsg::CheckCompleted { revision, errors })
        }

        GatewayRequest::Image { id, text } => Msg::Illustration(IllustrationMsg::ImageCompleted {
            id,
            image: generate_image(gateway, &text),
        }),

        GatewayRequest::StorybookPage { id, page, text } => {
            Msg::Illustration(IllustrationMsg::StorybookPageCompleted {
                id,
                page,
                image: generate_image(gateway, &text),
            })
        }

        GatewayRequest::Insertion { id, prompt } => Msg::Assist(AssistMsg::InsertionCompleted {
            id,
            result: gateway.generate_for_insertion(&prompt),
        }),

        GatewayRequest::CreativePrompts => {
            let prompts = match gateway.creative_prompts() {
                Ok(prompts) if !prompts.is_empty() => prompts,
                Ok(_) => fallback_creative_prompts(),
                Err(e) => {
                    tracing::warn!("Creative prompts failed: {}", e);
                    fallback_creative_prompts()
                }
            };
            Msg::Assist(AssistMsg::CreativePromptsCompleted(prompts))
        }
    }
}

fn generate_image(gateway: &dyn Gateway, text: &str) -> Option<Vec<u8>> {
    gateway.generate_image(text).unwrap_or_else(|e| {
        tracing::warn!("Image generation failed: {}", e);
        None
    })
}
