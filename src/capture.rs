//! Capture - Request/ready signalling for pause-menu screenshots

use crate::screenshot::Screenshot;
use image::RgbaImage;
use tracing::{debug, error};

/// Whatever renders the game; asked for the current frame at the end of a frame
pub trait FrameSource {
    /// Grab the frame currently on screen, `None` if capture failed
    fn capture_frame(&mut self) -> Option<RgbaImage>;
}

impl<F> FrameSource for F
where
    F: FnMut() -> Option<RgbaImage>,
{
    fn capture_frame(&mut self) -> Option<RgbaImage> {
        self()
    }
}

/// Where a capture request is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureState {
    #[default]
    Idle,
    Requested,
    Ready,
}

/// One-shot screenshot capture
///
/// A request is fulfilled at the next frame boundary. Consumers only see a
/// screenshot once it is `Ready`, so an incomplete capture is never handed out.
#[derive(Debug, Default)]
pub struct ScreenshotCapture {
    state: CaptureState,
    latest: Option<Screenshot>,
}

impl ScreenshotCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for a capture at the next frame boundary
    ///
    /// Returns false when a request is already pending.
    pub fn request(&mut self) -> bool {
        if self.state == CaptureState::Requested {
            return false;
        }
        debug!("Screenshot capture requested");
        self.state = CaptureState::Requested;
        true
    }

    /// Fulfil a pending request from the frame source
    ///
    /// Captures exactly once per request. A failed capture or encode is logged
    /// and drops the request; the previous screenshot stays available.
    pub fn end_of_frame(&mut self, source: &mut dyn FrameSource) -> Option<&Screenshot> {
        if self.state != CaptureState::Requested {
            return None;
        }

        let Some(frame) = source.capture_frame() else {
            error!("Failed to capture screenshot");
            self.state = CaptureState::Idle;
            return None;
        };

        match Screenshot::encode(&frame) {
            Ok(screenshot) => {
                debug!(
                    width = frame.width(),
                    height = frame.height(),
                    bytes = screenshot.len(),
                    "Screenshot captured"
                );
                self.latest = Some(screenshot);
                self.state = CaptureState::Ready;
                self.latest.as_ref()
            }
            Err(e) => {
                error!("Failed to encode screenshot: {}", e);
                self.state = CaptureState::Idle;
                None
            }
        }
    }

    /// Hand out a ready screenshot once, returning to idle
    pub fn take_ready(&mut self) -> Option<Screenshot> {
        if self.state != CaptureState::Ready {
            return None;
        }
        self.state = CaptureState::Idle;
        self.latest.clone()
    }

    /// The most recent completed capture, delivered or not
    pub fn latest(&self) -> Option<&Screenshot> {
        self.latest.as_ref()
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        self.state == CaptureState::Requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn solid(value: u8) -> RgbaImage {
        RgbaImage::from_pixel(2, 2, Rgba([value, value, value, 255]))
    }

    #[test]
    fn nothing_is_captured_without_a_request() {
        let mut capture = ScreenshotCapture::new();
        let mut calls = 0;
        let mut source = || {
            calls += 1;
            Some(solid(1))
        };

        assert!(capture.end_of_frame(&mut source).is_none());
        assert!(capture.take_ready().is_none());
        assert_eq!(calls, 0);
    }

    #[test]
    fn request_is_captured_exactly_once() {
        let mut capture = ScreenshotCapture::new();
        let mut calls = 0;
        let mut source = || {
            calls += 1;
            Some(solid(7))
        };

        assert!(capture.request());
        assert!(!capture.request());
        assert_eq!(capture.state(), CaptureState::Requested);

        assert!(capture.end_of_frame(&mut source).is_some());
        assert!(capture.end_of_frame(&mut source).is_none());
        drop(source);
        assert_eq!(calls, 1);
        assert_eq!(capture.state(), CaptureState::Ready);
    }

    #[test]
    fn ready_screenshot_is_handed_out_once() {
        let mut capture = ScreenshotCapture::new();
        capture.request();
        capture.end_of_frame(&mut || Some(solid(3)));

        let shot = capture.take_ready().unwrap();
        assert_eq!(shot.decode().unwrap(), solid(3));
        assert!(capture.take_ready().is_none());
        assert_eq!(capture.latest(), Some(&shot));
        assert_eq!(capture.state(), CaptureState::Idle);
    }

    #[test]
    fn failed_capture_keeps_previous_screenshot() {
        let mut capture = ScreenshotCapture::new();
        capture.request();
        capture.end_of_frame(&mut || Some(solid(9)));
        let first = capture.take_ready().unwrap();

        capture.request();
        assert!(capture.end_of_frame(&mut || -> Option<RgbaImage> { None }).is_none());
        assert_eq!(capture.state(), CaptureState::Idle);
        assert!(capture.take_ready().is_none());
        assert_eq!(capture.latest(), Some(&first));
    }
}
