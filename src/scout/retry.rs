use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;

/// Runs `op` up to `attempts` times with a fixed delay between tries,
/// returning the first success or the last error. `attempts` is clamped to
/// at least one.
pub async fn retry_fixed<T, E, F, Fut>(attempts: u32, delay: Duration, mut op: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let attempts = attempts.max(1);
    let mut attempt = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                attempt += 1;
                if attempt >= attempts {
                    return Err(err);
                }
                sleep(delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    #[tokio::test]
    async fn returns_first_success() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, &str> = retry_fixed(5, Duration::from_millis(1), || {
            let n = calls.fetch_add(1, Ordering::Relaxed);
            async move { Ok(n) }
        })
        .await;
        assert_eq!(result, Ok(0));
        assert_eq!(calls.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn succeeds_on_the_final_attempt() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, &str> = retry_fixed(5, Duration::from_millis(1), || {
            let n = calls.fetch_add(1, Ordering::Relaxed);
            async move {
                if n < 4 {
                    Err("transient")
                } else {
                    Ok(n)
                }
            }
        })
        .await;
        assert_eq!(result, Ok(4));
        assert_eq!(calls.load(Ordering::Relaxed), 5);
    }

    #[tokio::test]
    async fn exhausts_attempts_and_returns_last_error() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, &str> = retry_fixed(5, Duration::from_millis(1), || {
            calls.fetch_add(1, Ordering::Relaxed);
            async { Err("down") }
        })
        .await;
        assert_eq!(result, Err("down"));
        assert_eq!(calls.load(Ordering::Relaxed), 5);
    }
}
