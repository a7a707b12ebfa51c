use async_trait::async_trait;
use parking_lot::Mutex;
use repomod::{Engine, EngineError, FinishCommand, Options, Transform};
use std::path::Path;

use crate::integration::support::memory_overlay;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Counter {
    count: u32,
}

#[derive(Default)]
struct CountToThree {
    finishes: Mutex<Vec<u32>>,
}

#[async_trait]
impl Transform for CountToThree {
    type State = Counter;

    async fn initialize_state(
        &self,
        _options: &Options,
        previous: Option<Counter>,
    ) -> anyhow::Result<Option<Counter>> {
        let count = previous.map(|p| p.count).unwrap_or(0) + 1;
        Ok(Some(Counter { count }))
    }

    async fn handle_finish(
        &self,
        _options: &Options,
        state: Option<&Counter>,
    ) -> anyhow::Result<FinishCommand> {
        let count = state.map(|s| s.count).unwrap_or(0);
        self.finishes.lock().push(count);
        Ok(if count < 3 {
            FinishCommand::Repeat
        } else {
            FinishCommand::Noop
        })
    }
}

#[tokio::test]
async fn repeats_until_state_says_stop() {
    let (_fs, overlay) = memory_overlay(&[("/a/file.txt", "x")]);
    let engine = Engine::new(overlay, CountToThree::default());

    let commands = engine.execute(Path::new("/a"), &Options::new()).await.unwrap();

    assert!(commands.is_empty());
    assert_eq!(*engine.transform().finishes.lock(), vec![1, 2, 3]);
}

#[tokio::test]
async fn caller_supplied_state_seeds_the_first_pass() {
    let (_fs, overlay) = memory_overlay(&[("/a/file.txt", "x")]);
    let engine = Engine::new(overlay, CountToThree::default());

    engine
        .execute_with_state(Path::new("/a"), &Options::new(), Some(Counter { count: 5 }))
        .await
        .unwrap();

    assert_eq!(*engine.transform().finishes.lock(), vec![6]);
}

#[tokio::test]
async fn failing_state_initializer_is_fatal() {
    struct Broken;

    #[async_trait]
    impl Transform for Broken {
        type State = ();

        async fn initialize_state(
            &self,
            _options: &Options,
            _previous: Option<()>,
        ) -> anyhow::Result<Option<()>> {
            anyhow::bail!("no state")
        }
    }

    let (_fs, overlay) = memory_overlay(&[("/a/file.txt", "x")]);
    let err = Engine::new(overlay, Broken)
        .execute(Path::new("/a"), &Options::new())
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InitializeState(_)));
}
