use super::{
    error::Error,
    readiness_probe::{Probe, Readiness},
    reporter::Reporter,
    settings::Mode,
    wait_spec::WaitSpec,
};
use std::{io::Write, time::Duration};
use tokio::time::{self, Instant};

/// Bound on the single attempt made without `--wait`.
pub const ONE_SHOT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(5);

async fn attempt<P: Probe>(probe: &mut P, limit: Duration) -> bool {
    match time::timeout(limit, probe.probe_once()).await {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            log::debug!("Probe of {} failed: {}", probe.target(), e);
            false
        }
        Err(_) => {
            log::debug!(
                "Probe of {} failed: {}",
                probe.target(),
                Error::AttemptTimedOut(limit)
            );
            false
        }
    }
}

/// Makes one attempt and answers `yes` or `no`.
pub async fn probe_once_reported<P, O, E>(probe: &mut P, reporter: &mut Reporter<O, E>) -> Readiness
where
    P: Probe,
    O: Write,
    E: Write,
{
    let ready = attempt(probe, ONE_SHOT_ATTEMPT_TIMEOUT).await;
    reporter.answer(ready);
    match ready {
        true => Readiness::Ready,
        false => Readiness::NotReady,
    }
}

/// Attempts immediately, then every `interval` until `timeout` is spent.
///
/// At most `timeout / interval` retries are made, and no sleep starts that would end past the
/// deadline, so the run overshoots the budget by at most one attempt.
pub async fn probe_with_retry<P, O, E>(
    probe: &mut P,
    spec: &WaitSpec,
    reporter: &mut Reporter<O, E>,
) -> Readiness
where
    P: Probe,
    O: Write,
    E: Write,
{
    let started = Instant::now();
    let target = probe.target();
    let limit = spec.attempt_timeout();

    reporter.waiting(&target, spec);

    if attempt(probe, limit).await {
        reporter.ready(&target);
        return Readiness::Ready;
    }
    reporter.attempt_failed();

    for retry in 1..=spec.max_retries() {
        match started.elapsed().checked_add(spec.interval()) {
            Some(next) if next <= spec.timeout() => {}
            _ => {
                log::trace!("No time left for retry {}", retry);
                break;
            }
        }
        time::sleep(spec.interval()).await;

        log::trace!("Retry {} of {}", retry, spec.max_retries());
        if attempt(probe, limit).await {
            log::debug!("{} ready after {:?}", target, started.elapsed());
            reporter.ready(&target);
            return Readiness::Ready;
        }
        reporter.attempt_failed();
    }

    reporter.gave_up(spec);
    Readiness::TimedOut
}

pub async fn run<P, O, E>(mode: Mode, probe: &mut P, reporter: &mut Reporter<O, E>) -> Readiness
where
    P: Probe,
    O: Write,
    E: Write,
{
    match mode {
        Mode::OneShot => probe_once_reported(probe, reporter).await,
        Mode::Wait(spec) => probe_with_retry(probe, &spec, reporter).await,
    }
}
