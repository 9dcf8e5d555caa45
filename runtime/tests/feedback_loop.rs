//! Integration tests for the Store feedback loop
//!
//! Models a job that is submitted, polled until ready and then recorded,
//! the same shape as an asynchronous generation request.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use brandkit_core::{Effect, Reducer, SmallVec, smallvec};
use brandkit_runtime::{Store, StoreError};
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// Test Fixtures
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum JobAction {
    /// Submit a job that needs `polls` status checks before it is ready
    Submit { id: u32, polls: u32 },
    /// Status check; `remaining` counts down to zero
    Poll { id: u32, remaining: u32 },
    /// Job finished
    Ready { id: u32 },
    /// Submit two jobs that run side by side
    SubmitPair { first: u32, second: u32 },
    /// Run a long effect that produces nothing
    Stall { millis: u64 },
    /// Plain counter bump
    Bump,
}

#[derive(Debug, Clone, Default)]
struct JobState {
    submitted: Vec<u32>,
    polls: u32,
    ready: Vec<u32>,
    bumps: u32,
}

#[derive(Clone)]
struct JobEnvironment {
    poll_interval: Duration,
}

#[derive(Clone)]
struct JobReducer;

impl Reducer for JobReducer {
    type State = JobState;
    type Action = JobAction;
    type Environment = JobEnvironment;

    fn reduce(
        &self,
        state: &mut JobState,
        action: JobAction,
        env: &JobEnvironment,
    ) -> SmallVec<[Effect<JobAction>; 4]> {
        match action {
            JobAction::Submit { id, polls } => {
                state.submitted.push(id);
                smallvec![Effect::future(async move {
                    Some(JobAction::Poll { id, remaining: polls })
                })]
            },
            JobAction::Poll { id, remaining } => {
                state.polls += 1;
                if remaining == 0 {
                    return smallvec![Effect::future(async move { Some(JobAction::Ready { id }) })];
                }
                smallvec![Effect::delay(
                    env.poll_interval,
                    JobAction::Poll {
                        id,
                        remaining: remaining - 1,
                    },
                )]
            },
            JobAction::Ready { id } => {
                state.ready.push(id);
                SmallVec::new()
            },
            JobAction::SubmitPair { first, second } => {
                smallvec![
                    Effect::future(async move { Some(JobAction::Submit { id: first, polls: 2 }) }),
                    Effect::future(async move { Some(JobAction::Submit { id: second, polls: 0 }) }),
                ]
            },
            JobAction::Stall { millis } => smallvec![Effect::future(async move {
                tokio::time::sleep(Duration::from_millis(millis)).await;
                None
            })],
            JobAction::Bump => {
                state.bumps += 1;
                SmallVec::new()
            },
        }
    }
}

fn store() -> Store<JobState, JobAction, JobEnvironment, JobReducer> {
    Store::new(
        JobState::default(),
        JobReducer,
        JobEnvironment {
            poll_interval: Duration::from_millis(20),
        },
    )
}

// ============================================================================
// Tests
// ============================================================================

/// A cascading handle resolves only once the whole poll chain has finished
#[tokio::test]
async fn test_cascading_handle_covers_poll_chain() {
    let store = store();

    let mut handle = store
        .send_cascading(JobAction::Submit { id: 1, polls: 3 })
        .await
        .unwrap();
    handle.wait_with_timeout(Duration::from_secs(2)).await.unwrap();

    let (polls, ready) = store.state(|s| (s.polls, s.ready.clone())).await;
    assert_eq!(polls, 4);
    assert_eq!(ready, vec![1]);
    assert_eq!(store.pending_effects(), 0);
}

/// A direct handle only covers the first hop of the chain
#[tokio::test]
async fn test_direct_handle_covers_first_hop() {
    let store = store();

    let mut handle = store
        .send(JobAction::Submit { id: 1, polls: 3 })
        .await
        .unwrap();
    handle.wait_with_timeout(Duration::from_secs(2)).await.unwrap();

    let (polls, ready) = store.state(|s| (s.polls, s.ready.len())).await;
    assert_eq!(polls, 1);
    assert_eq!(ready, 0);

    // The rest of the chain still completes in the background
    tokio::time::timeout(Duration::from_secs(2), async {
        while store.pending_effects() > 0 {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .unwrap();
    assert_eq!(store.state(|s| s.ready.clone()).await, vec![1]);
}

/// Observers see every fed-back action, in reduction order
#[tokio::test]
async fn test_observers_see_feedback_in_order() {
    let store = store();
    let mut actions = store.subscribe_actions();

    store
        .send_cascading(JobAction::Submit { id: 7, polls: 1 })
        .await
        .unwrap()
        .wait()
        .await;

    let mut seen = Vec::new();
    while let Ok(action) = actions.try_recv() {
        seen.push(action);
    }
    assert_eq!(
        seen,
        vec![
            JobAction::Poll { id: 7, remaining: 1 },
            JobAction::Poll { id: 7, remaining: 0 },
            JobAction::Ready { id: 7 },
        ]
    );
}

/// Parallel jobs finish independently; the faster one lands first
#[tokio::test]
async fn test_parallel_jobs_both_complete() {
    let store = store();

    store
        .send_cascading(JobAction::SubmitPair { first: 1, second: 2 })
        .await
        .unwrap()
        .wait_with_timeout(Duration::from_secs(2))
        .await
        .unwrap();

    let (mut submitted, ready) = store.state(|s| (s.submitted.clone(), s.ready.clone())).await;
    submitted.sort_unstable();
    assert_eq!(submitted, vec![1, 2]);
    assert_eq!(ready, vec![2, 1]);
}

/// Concurrent senders never lose an update
#[tokio::test]
async fn test_concurrent_sends_are_serialized() {
    let store = Arc::new(store());

    let tasks: Vec<_> = (0..50)
        .map(|_| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.send(JobAction::Bump).await.unwrap() })
        })
        .collect();
    for task in tasks {
        task.await.unwrap();
    }

    assert_eq!(store.state(|s| s.bumps).await, 50);
    assert_eq!(store.revision(), 50);
}

/// A handle gives up on an effect that outlives its timeout
#[tokio::test]
async fn test_handle_times_out_on_stalled_effect() {
    let store = store();

    let mut handle = store.send(JobAction::Stall { millis: 200 }).await.unwrap();
    let result = handle.wait_with_timeout(Duration::from_millis(20)).await;

    assert_eq!(result, Err(StoreError::Timeout));
    assert_eq!(handle.pending(), 1);

    handle.wait_with_timeout(Duration::from_secs(2)).await.unwrap();
    assert_eq!(store.pending_effects(), 0);
}

/// Shutdown reports effects that outlive the timeout
#[tokio::test]
async fn test_shutdown_times_out_on_stalled_effect() {
    let store = store();
    store.send(JobAction::Stall { millis: 500 }).await.unwrap();

    let result = store.shutdown(Duration::from_millis(50)).await;
    assert_eq!(result, Err(StoreError::ShutdownTimeout(1)));

    let rejected = store.send(JobAction::Bump).await;
    assert!(matches!(rejected, Err(StoreError::ShutdownInProgress)));
}
