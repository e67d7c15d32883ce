//! Tests for loading configuration from the process environment

#[cfg(test)]
mod tests {
    use allot::allocation::AllocationError;
    use allot::core::AppConfig;
    use serial_test::serial;

    const VARS: [(&str, &str); 4] = [
        ("ALLOT_CALENDAR_EMAIL", "me@example.com"),
        ("ALLOT_GOOGLE_CLIENT_ID", "id"),
        ("ALLOT_GOOGLE_CLIENT_SECRET", "secret"),
        ("ALLOT_GOOGLE_REFRESH_TOKEN", "refresh"),
    ];

    fn set_vars(extra: &[(&str, &str)]) {
        for (key, value) in VARS.iter().chain(extra) {
            // Safe because every test touching the environment is serial
            unsafe { std::env::set_var(key, value) };
        }
    }

    fn clear_vars(extra: &[(&str, &str)]) {
        for (key, _) in VARS.iter().chain(extra) {
            unsafe { std::env::remove_var(key) };
        }
    }

    #[test]
    #[serial]
    fn it_loads_from_the_environment() {
        let extra = [("ALLOT_WORK_WEEK_HOURS", "35")];
        set_vars(&extra);
        let config = AppConfig::from_env();
        clear_vars(&extra);

        let config = config.unwrap();
        assert_eq!(config.calendar_email, "me@example.com");
        assert_eq!(config.work_week_hours.get(), 35.0);
    }

    #[test]
    #[serial]
    fn it_refuses_a_zero_hour_week() {
        let extra = [("ALLOT_WORK_WEEK_HOURS", "0")];
        set_vars(&extra);
        let config = AppConfig::from_env();
        clear_vars(&extra);

        assert!(matches!(config, Err(AllocationError::ConfigurationError(_))));
    }
}
