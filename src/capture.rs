use crate::error::Error;

/// Lifecycle boundary for a camera capture session.
///
/// Implementations own device selection and the underlying session; this
/// library only depends on the boundary. `start` and `stop` are idempotent.
/// A failed `start` leaves the session stopped and surfaces
/// [`Error::CaptureSetupFailed`]; the caller degrades to a no-preview state
/// rather than retrying or crashing.
pub trait CaptureSession {
    fn start(&mut self) -> Result<(), Error>;
    fn stop(&mut self);
    fn is_running(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeSession {
        device_present: bool,
        running: bool,
        start_calls: usize,
    }

    impl FakeSession {
        fn new(device_present: bool) -> FakeSession {
            FakeSession {
                device_present,
                running: false,
                start_calls: 0,
            }
        }
    }

    impl CaptureSession for FakeSession {
        fn start(&mut self) -> Result<(), Error> {
            if self.running {
                return Ok(());
            }
            self.start_calls += 1;
            if !self.device_present {
                return Err(Error::CaptureSetupFailed {
                    reason: "no capture device".into(),
                });
            }
            self.running = true;
            Ok(())
        }

        fn stop(&mut self) {
            self.running = false;
        }

        fn is_running(&self) -> bool {
            self.running
        }
    }

    #[test]
    fn start_and_stop_are_idempotent() {
        let mut session = FakeSession::new(true);
        session.start().unwrap();
        session.start().unwrap();
        assert!(session.is_running());
        assert_eq!(session.start_calls, 1);

        session.stop();
        session.stop();
        assert!(!session.is_running());
    }

    #[test]
    fn failed_setup_leaves_session_stopped() {
        let mut session = FakeSession::new(false);
        let err = session.start().unwrap_err();
        assert!(matches!(err, Error::CaptureSetupFailed { .. }));
        assert!(!session.is_running());
    }
}
