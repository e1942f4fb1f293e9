//! Retries for idempotent unary gRPC calls.
//!
//! Only transient transport failures are retried: [`Code::Unavailable`] and
//! [`Code::DeadlineExceeded`]. Every other status is returned to the caller
//! immediately. Do not wrap operations with side effects.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tonic::{Code, Status};
use tracing::Instrument;

use crate::client::GrpcClientConfig;

fn duration_to_u64_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Whether a failed call with this status code may be retried.
#[must_use]
pub fn is_retryable(code: Code) -> bool {
    matches!(code, Code::Unavailable | Code::DeadlineExceeded)
}

/// Retry policy for [`call_with_retry`].
#[derive(Debug, Clone)]
#[must_use]
pub struct RpcRetryConfig {
    /// Retry attempts, not counting the initial call.
    pub max_retries: u32,

    /// Attempt `n` waits `base_backoff * n` before retrying.
    pub base_backoff: Duration,

    /// Upper bound for a single backoff.
    pub max_backoff: Duration,
}

impl Default for RpcRetryConfig {
    fn default() -> Self {
        Self::from(&GrpcClientConfig::default())
    }
}

impl From<&GrpcClientConfig> for RpcRetryConfig {
    fn from(cfg: &GrpcClientConfig) -> Self {
        Self {
            max_retries: cfg.max_retries,
            base_backoff: cfg.base_backoff,
            max_backoff: cfg.max_backoff,
        }
    }
}

impl RpcRetryConfig {
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Default::default()
        }
    }

    pub fn with_base_backoff(mut self, duration: Duration) -> Self {
        self.base_backoff = duration;
        self
    }

    pub fn with_max_backoff(mut self, duration: Duration) -> Self {
        self.max_backoff = duration;
        self
    }

    fn backoff_for(&self, attempt: u32) -> Duration {
        (self.base_backoff * attempt).min(self.max_backoff)
    }
}

/// Run a unary call, retrying transient failures with capped linear backoff.
///
/// `call` receives the client and a fresh clone of `req` on every attempt.
/// `op_name` tags logs and spans, e.g. `"calculator.modulus"`.
///
/// # Errors
/// Returns the last `Status` when the error is not retryable or retries are exhausted.
pub async fn call_with_retry<TClient, F, Fut, Req, Res>(
    client: &mut TClient,
    cfg: Arc<RpcRetryConfig>,
    req: Req,
    call: F,
    op_name: &'static str,
) -> Result<Res, Status>
where
    F: Fn(&mut TClient, Req) -> Fut,
    Fut: std::future::Future<Output = Result<Res, Status>>,
    Req: Clone,
{
    let mut attempt: u32 = 0;

    loop {
        attempt += 1;

        let span = tracing::debug_span!("grpc_call", op = op_name, attempt);
        let result = call(client, req.clone()).instrument(span).await;

        let status = match result {
            Ok(res) => {
                if attempt > 1 {
                    tracing::info!(op = op_name, attempt, "gRPC call succeeded after retries");
                }
                return Ok(res);
            }
            Err(status) => status,
        };

        let code = status.code();
        if !is_retryable(code) || attempt > cfg.max_retries {
            tracing::warn!(
                op = op_name,
                attempt,
                code = ?code,
                message = %status.message(),
                "gRPC call failed"
            );
            return Err(status);
        }

        let backoff = cfg.backoff_for(attempt);
        tracing::debug!(
            op = op_name,
            attempt,
            code = ?code,
            backoff_ms = duration_to_u64_ms(backoff),
            "retrying gRPC call after backoff"
        );
        sleep(backoff).await;
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct CountingClient {
        calls: Arc<AtomicU32>,
    }

    fn fast_retries(max_retries: u32) -> Arc<RpcRetryConfig> {
        Arc::new(
            RpcRetryConfig::new(max_retries)
                .with_base_backoff(Duration::from_millis(1))
                .with_max_backoff(Duration::from_millis(5)),
        )
    }

    #[test]
    fn only_transport_codes_are_retryable() {
        assert!(is_retryable(Code::Unavailable));
        assert!(is_retryable(Code::DeadlineExceeded));
        assert!(!is_retryable(Code::Unimplemented));
        assert!(!is_retryable(Code::InvalidArgument));
        assert!(!is_retryable(Code::Internal));
    }

    #[test]
    fn retry_config_follows_client_config() {
        let client_cfg = GrpcClientConfig::new("calculator").with_max_retries(7);
        let cfg = RpcRetryConfig::from(&client_cfg);

        assert_eq!(cfg.max_retries, 7);
        assert_eq!(cfg.base_backoff, client_cfg.base_backoff);
        assert_eq!(cfg.max_backoff, client_cfg.max_backoff);
    }

    #[tokio::test]
    async fn returns_first_success_without_retry() {
        let calls = Arc::new(AtomicU32::new(0));
        let mut client = CountingClient {
            calls: calls.clone(),
        };

        let result = call_with_retry(
            &mut client,
            fast_retries(3),
            21_i64,
            |c, req| {
                c.calls.fetch_add(1, Ordering::SeqCst);
                async move { Ok::<_, Status>(req * 2) }
            },
            "test.double",
        )
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn does_not_retry_unimplemented() {
        let calls = Arc::new(AtomicU32::new(0));
        let mut client = CountingClient {
            calls: calls.clone(),
        };

        let result = call_with_retry(
            &mut client,
            fast_retries(3),
            (),
            |c, ()| {
                c.calls.fetch_add(1, Ordering::SeqCst);
                async move { Err::<(), _>(Status::unimplemented("method Add not implemented")) }
            },
            "test.add",
        )
        .await;

        assert_eq!(result.unwrap_err().code(), Code::Unimplemented);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_unavailable_until_success() {
        let calls = Arc::new(AtomicU32::new(0));
        let mut client = CountingClient {
            calls: calls.clone(),
        };

        let result = call_with_retry(
            &mut client,
            fast_retries(3),
            (),
            |c, ()| {
                let n = c.calls.fetch_add(1, Ordering::SeqCst) + 1;
                async move {
                    if n < 3 {
                        Err(Status::unavailable("connection refused"))
                    } else {
                        Ok("ok")
                    }
                }
            },
            "test.flaky",
        )
        .await;

        assert_eq!(result.unwrap(), "ok");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_retries() {
        let calls = Arc::new(AtomicU32::new(0));
        let mut client = CountingClient {
            calls: calls.clone(),
        };

        let result = call_with_retry(
            &mut client,
            fast_retries(2),
            (),
            |c, ()| {
                c.calls.fetch_add(1, Ordering::SeqCst);
                async move { Err::<(), _>(Status::deadline_exceeded("timeout")) }
            },
            "test.down",
        )
        .await;

        assert_eq!(result.unwrap_err().code(), Code::DeadlineExceeded);
        // initial call + 2 retries
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
