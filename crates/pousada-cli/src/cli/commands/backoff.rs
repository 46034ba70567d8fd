//! `pousada backoff` – print the retry schedule.

use pousada_core::retry::RetryPolicy;
use std::time::Duration;

fn print_schedule(policy: &RetryPolicy) {
    println!("  {:>7}  {:>10}  {:>10}", "Attempt", "Wait(ms)", "Total(ms)");
    println!("  {}  {}  {}", "-------", "----------", "----------");
    let mut total = Duration::ZERO;
    for attempt in policy.schedule() {
        total += attempt.delay;
        println!(
            "  {:>7}  {:>10}  {:>10}",
            attempt.index + 1,
            attempt.delay.as_millis(),
            total.as_millis()
        );
    }
}

pub fn run_backoff(policy: &RetryPolicy) {
    println!(
        "max_retries={} base_delay={}ms max_delay={}ms factor={}",
        policy.max_retries,
        policy.base_delay.as_millis(),
        policy.max_delay.as_millis(),
        policy.backoff_factor
    );
    print_schedule(policy);
}
