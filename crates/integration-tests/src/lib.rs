//! Intentionally empty; the behavioral suites live in `tests/`.
