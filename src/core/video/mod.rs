//=========================================================================
// Video System
//
// Window and rendering-context lifecycle management.
//
// Architecture:
// ```text
//   Uninitialized ──init──> SubsystemReady ──create──> WindowCreated
//         ^                                                 │
//         └────────────────── destroy ──────────────────────┘
//              (destroy also quits the video subsystem,
//               so the next create re-inits from scratch)
// ```
//
// Responsibilities:
// - Accumulate display configuration (dimensions, color depth, buffer
//   requests, fullscreen) before window creation
// - Drive the backend through the lifecycle state machine, enforcing
//   the single-window contract
// - Retry window creation once without destination alpha when the
//   created context lacks the multitexture capability
//
// Error policy: every `VideoError` is fatal for this engine. The system
// reports the failure instead of terminating the process, leaving the
// abort decision to the caller.
//
//=========================================================================

//=== External Crates =====================================================

use log::{error, info, warn};

//=== VideoError ==========================================================

/// Windowing failures. All variants are unrecoverable for the engine;
/// callers typically log and terminate.
#[derive(Debug)]
pub enum VideoError {
    /// The video subsystem could not be brought up.
    SubsystemInit(String),

    /// The backend failed to create the window.
    WindowCreation(String),

    /// The backend failed to create or bind the rendering context.
    ContextCreation(String),

    /// The context lacks a required capability even after the no-alpha
    /// fallback retry.
    CapabilityUnavailable { capability: &'static str },

    /// `create` was called while a window already exists (programmer
    /// error: the window is a singleton).
    WindowAlreadyExists,

    /// `create` was called before any dimensions were configured.
    NoDimensions,

    /// `destroy` was called with an id that does not match the live
    /// window (programmer error).
    DestroyMismatch { requested: WindowId },
}

impl std::fmt::Display for VideoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SubsystemInit(e) => write!(f, "couldn't initialize video subsystem: {}", e),
            Self::WindowCreation(e) => write!(f, "couldn't create window: {}", e),
            Self::ContextCreation(e) => write!(f, "couldn't create rendering context: {}", e),
            Self::CapabilityUnavailable { capability } => {
                write!(f, "{} is not available", capability)
            }
            Self::WindowAlreadyExists => write!(f, "a window already exists"),
            Self::NoDimensions => write!(f, "window dimensions were never configured"),
            Self::DestroyMismatch { requested } => {
                write!(f, "destroy requested for unknown window {:?}", requested)
            }
        }
    }
}

impl std::error::Error for VideoError {}

//=== Identifiers & Capability Types ======================================

/// Backend-assigned id of a created window. Nonzero while live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(pub u32);

/// Per-channel bit depths of the created framebuffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelBits {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

//=== DisplayFlags ========================================================

/// Display mode requests accumulated before window creation.
///
/// Setters after creation are recorded but have no effect on the live
/// window; they apply to the next create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayFlags {
    pub fullscreen: bool,
    pub double_buffer: bool,
    /// Request 32-bit color (8/8/8) instead of 16-bit (5/6/5).
    pub color32: bool,
    /// Request a destination alpha channel.
    pub alpha: bool,
    /// Request a depth buffer.
    pub depth_buffer: bool,
    /// Request a stencil buffer.
    pub stencil: bool,
}

impl DisplayFlags {
    pub const NONE: Self = Self {
        fullscreen: false,
        double_buffer: false,
        color32: false,
        alpha: false,
        depth_buffer: false,
        stencil: false,
    };
}

impl Default for DisplayFlags {
    fn default() -> Self {
        Self::NONE
    }
}

//=== PixelFormat =========================================================

/// Concrete framebuffer request derived from [`DisplayFlags`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelFormat {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
    pub depth: u8,
    pub stencil: u8,
    pub double_buffer: bool,
}

//=== DisplaySettings =====================================================

/// Accumulated window configuration.
#[derive(Debug, Clone)]
pub struct DisplaySettings {
    width: u32,
    height: u32,
    flags: DisplayFlags,
    /// Effective color depth in bits once flags are applied; 0 means
    /// "whatever the display gives us" (16-bit path).
    bit_depth: u32,
}

impl DisplaySettings {
    pub fn new() -> Self {
        Self {
            width: 0,
            height: 0,
            flags: DisplayFlags::NONE,
            bit_depth: 0,
        }
    }

    /// Sets window dimensions. The position arguments are accepted for
    /// interface compatibility but not implemented; a non-origin request
    /// is logged and ignored.
    pub fn set_window_mode(&mut self, x: i32, y: i32, width: u32, height: u32) {
        if x != 0 || y != 0 {
            warn!(target: "video", "ignoring ({}, {}) initial window position - not implemented", x, y);
        }
        self.width = width;
        self.height = height;
    }

    /// Replaces the display mode flags and recomputes the color depth.
    pub fn set_flags(&mut self, flags: DisplayFlags) {
        self.flags = flags;
        self.bit_depth = if flags.color32 { 32 } else { 0 };
    }

    pub fn flags(&self) -> DisplayFlags {
        self.flags
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn bit_depth(&self) -> u32 {
        self.bit_depth
    }

    /// Derives the framebuffer request from the current flags.
    ///
    /// 32-bit color gets 8/8/8 channels and a 24-bit depth buffer;
    /// otherwise 5/6/5 with 16-bit depth. Alpha and stencil are 8 bits
    /// when requested, 0 otherwise.
    pub fn pixel_format(&self) -> PixelFormat {
        let (red, green, blue, z_depth) = if self.flags.color32 {
            (8, 8, 8, 24)
        } else {
            (5, 6, 5, 16)
        };
        PixelFormat {
            red,
            green,
            blue,
            alpha: if self.flags.alpha { 8 } else { 0 },
            depth: if self.flags.depth_buffer { z_depth } else { 0 },
            stencil: if self.flags.stencil { 8 } else { 0 },
            double_buffer: self.flags.double_buffer,
        }
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self::new()
    }
}

//=== VideoBackend ========================================================

/// Everything the state machine needs to create a window.
#[derive(Debug, Clone)]
pub struct WindowRequest<'a> {
    pub title: &'a str,
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
    pub pixel_format: PixelFormat,
    /// Request vsync on the swap chain (set when double buffering is on).
    pub vsync: bool,
}

/// What the backend reports about a created window/context pair.
#[derive(Debug, Clone, Copy)]
pub struct CreatedWindow {
    pub id: WindowId,
    pub channel_bits: ChannelBits,
    pub has_multitexture: bool,
}

/// Backend seam for the windowing library.
///
/// The winit implementation lives in the platform layer; tests use a
/// scripted mock. Pointer operations are best-effort: a backend without
/// a live window treats them as no-ops.
pub trait VideoBackend {
    /// Brings up the video subsystem. Called at most once per
    /// `Uninitialized → SubsystemReady` transition.
    fn init_subsystem(&mut self) -> Result<(), VideoError>;

    /// Records framebuffer attribute requests for the next window.
    fn apply_pixel_format(&mut self, format: &PixelFormat);

    /// Creates the window and rendering context.
    fn create_window(&mut self, request: &WindowRequest<'_>) -> Result<CreatedWindow, VideoError>;

    /// Destroys the window and its rendering context.
    fn destroy_window(&mut self, id: WindowId);

    /// Tears the video subsystem down entirely.
    fn quit_subsystem(&mut self);

    /// Presents the back buffer.
    fn swap_buffers(&mut self);

    /// Moves the pointer to window coordinates.
    fn warp_pointer(&mut self, x: i32, y: i32);

    /// Confines the pointer to the window (or releases it).
    fn set_pointer_grab(&mut self, grabbed: bool);

    /// Shows or hides the pointer.
    fn set_pointer_visible(&mut self, visible: bool);

    /// Enables relative mouse mode (implies grab).
    fn set_relative_mouse(&mut self, enabled: bool);
}

//=== VideoState ==========================================================

/// Lifecycle state of the video subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoState {
    Uninitialized,
    SubsystemReady,
    WindowCreated,
}

//=== WindowContext =======================================================

/// Bookkeeping for the live window (singleton).
#[derive(Debug, Clone)]
pub struct WindowContext {
    pub id: WindowId,
    pub width: u32,
    pub height: u32,
    pub bit_depth: u32,
    pub channel_bits: ChannelBits,
}

//=== VideoSystem =========================================================

/// Drives a [`VideoBackend`] through the window lifecycle.
///
/// The backend is passed per call rather than owned, so the same state
/// machine serves the winit integration and headless tests alike.
pub struct VideoSystem {
    state: VideoState,
    settings: DisplaySettings,
    window: Option<WindowContext>,
}

impl VideoSystem {
    pub fn new() -> Self {
        Self {
            state: VideoState::Uninitialized,
            settings: DisplaySettings::new(),
            window: None,
        }
    }

    //--- Configuration ----------------------------------------------------

    /// Sets window dimensions (position ignored, logged).
    pub fn set_window_mode(&mut self, x: i32, y: i32, width: u32, height: u32) {
        self.settings.set_window_mode(x, y, width, height);
    }

    /// Replaces the display flags and pushes the derived framebuffer
    /// request to the backend, initializing the subsystem first if
    /// needed.
    pub fn set_display_mode<B: VideoBackend>(
        &mut self,
        backend: &mut B,
        flags: DisplayFlags,
    ) -> Result<(), VideoError> {
        self.settings.set_flags(flags);
        self.ensure_subsystem(backend)?;
        backend.apply_pixel_format(&self.settings.pixel_format());
        Ok(())
    }

    pub fn settings(&self) -> &DisplaySettings {
        &self.settings
    }

    //--- Lifecycle --------------------------------------------------------

    /// Brings up the video subsystem if it is not already running.
    pub fn init<B: VideoBackend>(&mut self, backend: &mut B) -> Result<(), VideoError> {
        self.ensure_subsystem(backend)
    }

    /// Creates the window and rendering context.
    ///
    /// Fails fatally on a second window, missing dimensions, backend
    /// failure, or a context without multitexturing even after one
    /// retry without destination alpha.
    pub fn create<B: VideoBackend>(
        &mut self,
        backend: &mut B,
        title: &str,
    ) -> Result<WindowId, VideoError> {
        if self.window.is_some() {
            return Err(VideoError::WindowAlreadyExists);
        }
        let (width, height) = self.settings.dimensions();
        if width == 0 || height == 0 {
            return Err(VideoError::NoDimensions);
        }

        self.ensure_subsystem(backend)?;

        let format = self.settings.pixel_format();
        let created = match self.try_create(backend, title, format)? {
            created if created.has_multitexture => created,
            lacking => {
                // One retry without destination alpha before giving up.
                warn!(target: "video", "multitexturing missing, trying without destination alpha");
                self.teardown(backend, lacking.id);
                self.ensure_subsystem(backend)?;

                let mut fallback = self.settings.pixel_format();
                fallback.alpha = 0;
                let retry = self.try_create(backend, title, fallback)?;
                if !retry.has_multitexture {
                    error!(target: "video", "multitexturing is not available");
                    self.teardown(backend, retry.id);
                    return Err(VideoError::CapabilityUnavailable {
                        capability: "multitexturing",
                    });
                }
                retry
            }
        };

        let context = WindowContext {
            id: created.id,
            width,
            height,
            bit_depth: self.settings.bit_depth(),
            channel_bits: created.channel_bits,
        };
        info!(
            target: "video",
            "window {:?} created: {}x{} ({} bpp)",
            context.id, width, height, context.bit_depth
        );
        self.window = Some(context);
        self.state = VideoState::WindowCreated;
        Ok(created.id)
    }

    /// Destroys the window, its rendering context, and the video
    /// subsystem. The id must match the live window.
    pub fn destroy<B: VideoBackend>(
        &mut self,
        backend: &mut B,
        id: WindowId,
    ) -> Result<(), VideoError> {
        match &self.window {
            Some(context) if context.id == id => {
                self.teardown(backend, id);
                self.window = None;
                info!(target: "video", "window {:?} destroyed", id);
                Ok(())
            }
            _ => Err(VideoError::DestroyMismatch { requested: id }),
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn state(&self) -> VideoState {
        self.state
    }

    pub fn window(&self) -> Option<&WindowContext> {
        self.window.as_ref()
    }

    /// Configured window dimensions.
    pub fn dimensions(&self) -> (u32, u32) {
        self.settings.dimensions()
    }

    /// Channel depths of the live window's framebuffer.
    pub fn channel_depths(&self) -> Option<ChannelBits> {
        self.window.as_ref().map(|w| w.channel_bits)
    }

    //--- Pass-throughs ----------------------------------------------------
    //
    // Best-effort operations on the live window; silent no-ops without
    // one, matching the original interface.
    //

    pub fn swap_buffers<B: VideoBackend>(&mut self, backend: &mut B) {
        if self.window.is_some() {
            backend.swap_buffers();
        }
    }

    pub fn warp_pointer<B: VideoBackend>(&mut self, backend: &mut B, x: i32, y: i32) {
        if self.window.is_some() {
            backend.warp_pointer(x, y);
        }
    }

    pub fn set_pointer_grab<B: VideoBackend>(&mut self, backend: &mut B, grabbed: bool) {
        if self.window.is_some() {
            backend.set_pointer_grab(grabbed);
        }
    }

    pub fn set_pointer_visible<B: VideoBackend>(&mut self, backend: &mut B, visible: bool) {
        backend.set_pointer_visible(visible);
    }

    pub fn set_relative_mouse<B: VideoBackend>(&mut self, backend: &mut B, enabled: bool) {
        if self.window.is_some() {
            backend.set_relative_mouse(enabled);
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn ensure_subsystem<B: VideoBackend>(&mut self, backend: &mut B) -> Result<(), VideoError> {
        if self.state == VideoState::Uninitialized {
            backend.init_subsystem()?;
            self.state = VideoState::SubsystemReady;
        }
        Ok(())
    }

    fn try_create<B: VideoBackend>(
        &mut self,
        backend: &mut B,
        title: &str,
        format: PixelFormat,
    ) -> Result<CreatedWindow, VideoError> {
        backend.apply_pixel_format(&format);
        let (width, height) = self.settings.dimensions();
        let request = WindowRequest {
            title,
            width,
            height,
            fullscreen: self.settings.flags().fullscreen,
            pixel_format: format,
            vsync: format.double_buffer,
        };
        backend.create_window(&request)
    }

    /// Window, context, and subsystem all go down together; the next
    /// create re-initializes from scratch.
    fn teardown<B: VideoBackend>(&mut self, backend: &mut B, id: WindowId) {
        backend.destroy_window(id);
        backend.quit_subsystem();
        self.state = VideoState::Uninitialized;
    }
}

impl Default for VideoSystem {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    //--- Test Helpers -----------------------------------------------------

    /// Scripted backend recording every call.
    #[derive(Debug, PartialEq)]
    enum Call {
        Init,
        ApplyFormat(PixelFormat),
        Create(u32, u32, bool),
        Destroy(WindowId),
        Quit,
        Swap,
        Warp(i32, i32),
        Grab(bool),
        Visible(bool),
        Relative(bool),
    }

    struct MockBackend {
        calls: Vec<Call>,
        next_id: u32,
        init_fails: bool,
        create_fails: bool,
        /// Multitexture result per create, front first; empty = true.
        multitexture: VecDeque<bool>,
        last_format: Option<PixelFormat>,
    }

    impl MockBackend {
        fn new() -> Self {
            Self {
                calls: Vec::new(),
                next_id: 1,
                init_fails: false,
                create_fails: false,
                multitexture: VecDeque::new(),
                last_format: None,
            }
        }
    }

    impl VideoBackend for MockBackend {
        fn init_subsystem(&mut self) -> Result<(), VideoError> {
            self.calls.push(Call::Init);
            if self.init_fails {
                Err(VideoError::SubsystemInit("no display".into()))
            } else {
                Ok(())
            }
        }

        fn apply_pixel_format(&mut self, format: &PixelFormat) {
            self.calls.push(Call::ApplyFormat(*format));
            self.last_format = Some(*format);
        }

        fn create_window(
            &mut self,
            request: &WindowRequest<'_>,
        ) -> Result<CreatedWindow, VideoError> {
            self.calls
                .push(Call::Create(request.width, request.height, request.fullscreen));
            if self.create_fails {
                return Err(VideoError::WindowCreation("mode not supported".into()));
            }
            let id = WindowId(self.next_id);
            self.next_id += 1;
            let format = request.pixel_format;
            Ok(CreatedWindow {
                id,
                channel_bits: ChannelBits {
                    red: format.red,
                    green: format.green,
                    blue: format.blue,
                    alpha: format.alpha,
                },
                has_multitexture: self.multitexture.pop_front().unwrap_or(true),
            })
        }

        fn destroy_window(&mut self, id: WindowId) {
            self.calls.push(Call::Destroy(id));
        }

        fn quit_subsystem(&mut self) {
            self.calls.push(Call::Quit);
        }

        fn swap_buffers(&mut self) {
            self.calls.push(Call::Swap);
        }

        fn warp_pointer(&mut self, x: i32, y: i32) {
            self.calls.push(Call::Warp(x, y));
        }

        fn set_pointer_grab(&mut self, grabbed: bool) {
            self.calls.push(Call::Grab(grabbed));
        }

        fn set_pointer_visible(&mut self, visible: bool) {
            self.calls.push(Call::Visible(visible));
        }

        fn set_relative_mouse(&mut self, enabled: bool) {
            self.calls.push(Call::Relative(enabled));
        }
    }

    fn configured_system() -> VideoSystem {
        let mut video = VideoSystem::new();
        video.set_window_mode(0, 0, 800, 600);
        video
    }

    //=====================================================================
    // DisplaySettings Tests
    //=====================================================================

    #[test]
    fn window_position_is_ignored() {
        let mut settings = DisplaySettings::new();
        settings.set_window_mode(200, 100, 640, 480);
        assert_eq!(settings.dimensions(), (640, 480));
    }

    #[test]
    fn pixel_format_for_32bit_color() {
        let mut settings = DisplaySettings::new();
        settings.set_flags(DisplayFlags {
            color32: true,
            alpha: true,
            depth_buffer: true,
            stencil: true,
            double_buffer: true,
            fullscreen: false,
        });

        let format = settings.pixel_format();
        assert_eq!((format.red, format.green, format.blue), (8, 8, 8));
        assert_eq!(format.alpha, 8);
        assert_eq!(format.depth, 24);
        assert_eq!(format.stencil, 8);
        assert!(format.double_buffer);
        assert_eq!(settings.bit_depth(), 32);
    }

    #[test]
    fn pixel_format_for_16bit_color() {
        let mut settings = DisplaySettings::new();
        settings.set_flags(DisplayFlags {
            depth_buffer: true,
            ..DisplayFlags::NONE
        });

        let format = settings.pixel_format();
        assert_eq!((format.red, format.green, format.blue), (5, 6, 5));
        assert_eq!(format.alpha, 0);
        assert_eq!(format.depth, 16);
        assert_eq!(format.stencil, 0);
        assert_eq!(settings.bit_depth(), 0);
    }

    //=====================================================================
    // Lifecycle Tests
    //=====================================================================

    #[test]
    fn init_is_idempotent() {
        let mut video = VideoSystem::new();
        let mut backend = MockBackend::new();

        video.init(&mut backend).unwrap();
        video.init(&mut backend).unwrap();

        assert_eq!(
            backend.calls.iter().filter(|c| **c == Call::Init).count(),
            1
        );
        assert_eq!(video.state(), VideoState::SubsystemReady);
    }

    #[test]
    fn create_transitions_to_window_created() {
        let mut video = configured_system();
        let mut backend = MockBackend::new();

        let id = video.create(&mut backend, "game").unwrap();

        assert_eq!(video.state(), VideoState::WindowCreated);
        assert_eq!(video.window().unwrap().id, id);
        assert_eq!(video.dimensions(), (800, 600));
    }

    #[test]
    fn second_create_without_destroy_is_rejected() {
        let mut video = configured_system();
        let mut backend = MockBackend::new();

        video.create(&mut backend, "game").unwrap();
        let second = video.create(&mut backend, "game");

        assert!(matches!(second, Err(VideoError::WindowAlreadyExists)));
    }

    #[test]
    fn create_without_dimensions_is_rejected() {
        let mut video = VideoSystem::new();
        let mut backend = MockBackend::new();

        assert!(matches!(
            video.create(&mut backend, "game"),
            Err(VideoError::NoDimensions)
        ));
    }

    #[test]
    fn destroy_then_create_succeeds() {
        let mut video = configured_system();
        let mut backend = MockBackend::new();

        let id = video.create(&mut backend, "game").unwrap();
        video.destroy(&mut backend, id).unwrap();
        assert_eq!(video.state(), VideoState::Uninitialized);

        let second = video.create(&mut backend, "game").unwrap();
        assert_ne!(second, id);
        assert_eq!(video.state(), VideoState::WindowCreated);

        // Subsystem was re-initialized from scratch for the second window.
        assert_eq!(
            backend.calls.iter().filter(|c| **c == Call::Init).count(),
            2
        );
    }

    #[test]
    fn destroy_with_mismatched_id_is_rejected() {
        let mut video = configured_system();
        let mut backend = MockBackend::new();

        video.create(&mut backend, "game").unwrap();
        let result = video.destroy(&mut backend, WindowId(999));

        assert!(matches!(
            result,
            Err(VideoError::DestroyMismatch { requested: WindowId(999) })
        ));
        // The live window is untouched.
        assert_eq!(video.state(), VideoState::WindowCreated);
    }

    #[test]
    fn destroy_quits_subsystem() {
        let mut video = configured_system();
        let mut backend = MockBackend::new();

        let id = video.create(&mut backend, "game").unwrap();
        video.destroy(&mut backend, id).unwrap();

        assert!(backend.calls.contains(&Call::Destroy(id)));
        assert!(backend.calls.contains(&Call::Quit));
    }

    //=====================================================================
    // Failure & Fallback Tests
    //=====================================================================

    #[test]
    fn subsystem_failure_propagates() {
        let mut video = configured_system();
        let mut backend = MockBackend::new();
        backend.init_fails = true;

        assert!(matches!(
            video.create(&mut backend, "game"),
            Err(VideoError::SubsystemInit(_))
        ));
        assert_eq!(video.state(), VideoState::Uninitialized);
    }

    #[test]
    fn window_creation_failure_propagates() {
        let mut video = configured_system();
        let mut backend = MockBackend::new();
        backend.create_fails = true;

        assert!(matches!(
            video.create(&mut backend, "game"),
            Err(VideoError::WindowCreation(_))
        ));
    }

    #[test]
    fn missing_multitexture_retries_without_alpha() {
        let mut video = configured_system();
        video.settings.set_flags(DisplayFlags {
            color32: true,
            alpha: true,
            ..DisplayFlags::NONE
        });
        let mut backend = MockBackend::new();
        backend.multitexture.push_back(false); // first create lacks it
        backend.multitexture.push_back(true); // retry has it

        let id = video.create(&mut backend, "game").unwrap();

        // First window was torn down along with the subsystem.
        assert!(backend.calls.contains(&Call::Destroy(WindowId(1))));
        assert!(backend.calls.contains(&Call::Quit));
        assert_eq!(id, WindowId(2));

        // The retry dropped the destination alpha request.
        let last = backend.last_format.unwrap();
        assert_eq!(last.alpha, 0);
        assert_eq!(video.channel_depths().unwrap().alpha, 0);
    }

    #[test]
    fn fallback_without_multitexture_is_fatal() {
        let mut video = configured_system();
        let mut backend = MockBackend::new();
        backend.multitexture.push_back(false);
        backend.multitexture.push_back(false);

        let result = video.create(&mut backend, "game");

        assert!(matches!(
            result,
            Err(VideoError::CapabilityUnavailable { capability: "multitexturing" })
        ));
        // Both attempts were cleaned up; no window is recorded.
        assert!(video.window().is_none());
        assert_eq!(video.state(), VideoState::Uninitialized);
    }

    //=====================================================================
    // Display Mode Tests
    //=====================================================================

    #[test]
    fn set_display_mode_applies_format_to_backend() {
        let mut video = VideoSystem::new();
        let mut backend = MockBackend::new();

        video
            .set_display_mode(&mut backend, DisplayFlags {
                color32: true,
                ..DisplayFlags::NONE
            })
            .unwrap();

        assert_eq!(video.state(), VideoState::SubsystemReady);
        let format = backend.last_format.unwrap();
        assert_eq!((format.red, format.green, format.blue), (8, 8, 8));
    }

    #[test]
    fn fullscreen_flag_reaches_window_request() {
        let mut video = configured_system();
        video.settings.set_flags(DisplayFlags {
            fullscreen: true,
            ..DisplayFlags::NONE
        });
        let mut backend = MockBackend::new();

        video.create(&mut backend, "game").unwrap();

        assert!(backend.calls.contains(&Call::Create(800, 600, true)));
    }

    //=====================================================================
    // Pass-through Tests
    //=====================================================================

    #[test]
    fn pointer_ops_require_live_window() {
        let mut video = configured_system();
        let mut backend = MockBackend::new();

        video.swap_buffers(&mut backend);
        video.warp_pointer(&mut backend, 10, 10);
        video.set_pointer_grab(&mut backend, true);
        video.set_relative_mouse(&mut backend, true);
        assert!(backend.calls.is_empty(), "no-ops without a window");

        video.create(&mut backend, "game").unwrap();
        video.swap_buffers(&mut backend);
        video.warp_pointer(&mut backend, 10, 10);
        video.set_pointer_grab(&mut backend, true);
        video.set_relative_mouse(&mut backend, true);

        assert!(backend.calls.contains(&Call::Swap));
        assert!(backend.calls.contains(&Call::Warp(10, 10)));
        assert!(backend.calls.contains(&Call::Grab(true)));
        assert!(backend.calls.contains(&Call::Relative(true)));
    }

    #[test]
    fn pointer_visibility_works_without_window() {
        let mut video = VideoSystem::new();
        let mut backend = MockBackend::new();

        video.set_pointer_visible(&mut backend, false);
        assert!(backend.calls.contains(&Call::Visible(false)));
    }
}
