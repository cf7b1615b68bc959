//! In-memory request channel for tests.

use crate::{ApiError, ApiRequest, ApiResponse, ApiResult, RequestChannel};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Replays queued responses in order and records every request.
///
/// Once the queue is empty the fallback response is returned, or an
/// `InvalidResponse` error when no fallback is set.
#[derive(Debug, Default)]
pub struct ScriptedChannel {
    responses: Mutex<VecDeque<ApiResult<ApiResponse>>>,
    fallback: Option<ApiResponse>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every unscripted request with `response`.
    pub fn with_fallback(response: ApiResponse) -> Self {
        Self {
            fallback: Some(response),
            ..Self::default()
        }
    }

    pub fn push(&self, response: ApiResponse) {
        self.lock_responses().push_back(Ok(response));
    }

    pub fn push_error(&self, error: ApiError) {
        self.lock_responses().push_back(Err(error));
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<ApiRequest> {
        match self.requests.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn lock_responses(&self) -> std::sync::MutexGuard<'_, VecDeque<ApiResult<ApiResponse>>> {
        match self.responses.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[async_trait]
impl RequestChannel for ScriptedChannel {
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        match self.requests.lock() {
            Ok(mut guard) => guard.push(request),
            Err(poisoned) => poisoned.into_inner().push(request),
        }

        let next = self.lock_responses().pop_front();
        match next {
            Some(result) => result,
            None => self
                .fallback
                .clone()
                .ok_or_else(|| ApiError::InvalidResponse("no scripted response".into())),
        }
    }
}
