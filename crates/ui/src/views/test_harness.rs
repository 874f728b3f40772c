use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use quiz_core::model::{Question, QuestionId, QuizSettingsDraft, SessionScreen};
use quiz_core::time::fixed_clock;
use services::{AppServices, FetchError, QuestionSource, QuizLoopService, SessionService};
use storage::{InMemoryStore, Storage};

use crate::app::SessionRoot;
use crate::context::{UiApp, build_app_context};
use crate::views::quiz::QuizTestHandles;

/// Serves `size` questions whose correct answer is `Right {id}`, or fails.
pub struct FakeSource {
    size: u32,
    fail: bool,
    fetches: AtomicUsize,
}

impl FakeSource {
    pub fn with_size(size: u32) -> Self {
        Self {
            size,
            fail: false,
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            size: 0,
            fail: true,
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

pub fn question(id: u32) -> Question {
    Question::new(
        QuestionId::new(id),
        format!("Question text {id}"),
        format!("Right {id}"),
        vec![
            format!("Wrong {id}a"),
            format!("Right {id}"),
            format!("Wrong {id}b"),
            format!("Wrong {id}c"),
        ],
        "multiple",
    )
    .expect("valid question")
}

#[async_trait]
impl QuestionSource for FakeSource {
    async fn fetch_batch(&self) -> Result<Vec<Question>, FetchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(FetchError::NoResults);
        }
        Ok((0..self.size).map(question).collect())
    }
}

struct TestApp {
    services: AppServices,
    initial: SessionScreen,
}

impl UiApp for TestApp {
    fn session(&self) -> Arc<SessionService> {
        self.services.session()
    }

    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        self.services.quiz_loop()
    }

    fn initial_screen(&self) -> SessionScreen {
        self.initial.clone()
    }
}

#[derive(Props, Clone)]
struct HarnessProps {
    app: Arc<TestApp>,
    handles: QuizTestHandles,
}

impl PartialEq for HarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn HarnessRoot(props: HarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.handles.clone());
    rsx! { SessionRoot {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub kv: InMemoryStore,
    pub source: Arc<FakeSource>,
    pub handles: QuizTestHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Drive a few rounds so chained tasks (driver, transitions) settle.
    pub async fn settle(&mut self) {
        for _ in 0..4 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }

    /// Click an option through the view's own pick callback.
    pub fn pick(&self, option: &str) {
        let pick = self.handles.pick();
        let option = option.to_owned();
        self.dom.in_runtime(|| pick.call(option));
    }

    /// Press the header logout button.
    pub fn logout(&self) {
        let logout = self.handles.logout();
        self.dom.in_runtime(|| logout.call(()));
    }

    /// Move the paused clock forward, then let woken tasks run.
    pub async fn advance(&mut self, by: Duration) {
        tokio::time::advance(by).await;
        self.settle().await;
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(initial: SessionScreen, source: FakeSource) -> ViewHarness {
    let kv = InMemoryStore::new();
    let storage = Storage {
        local_state: Arc::new(kv.clone()),
    };
    let source = Arc::new(source);
    let settings = QuizSettingsDraft::new()
        .validate()
        .expect("default settings");
    let services = AppServices::from_storage(
        &storage,
        fixed_clock(),
        settings,
        Arc::clone(&source) as Arc<dyn QuestionSource>,
    );
    let handles = QuizTestHandles::default();

    let dom = VirtualDom::new_with_props(
        HarnessRoot,
        HarnessProps {
            app: Arc::new(TestApp { services, initial }),
            handles: handles.clone(),
        },
    );

    ViewHarness {
        dom,
        kv,
        source,
        handles,
    }
}
