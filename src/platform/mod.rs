//=========================================================================
// Platform Subsystem
//
// Bridges Winit (OS-level events) with the engine's core subsystems.
//
// Architecture:
// ```text
//  Main Thread:
//  ┌────────────────────────────────────────┐
//  │  Winit Event Loop                      │
//  │   ↓                                    │
//  │  EventMapper                           │
//  │   ├─ Winit WindowEvent → RawEvent      │
//  │   └─ Synthesizes cursor deltas         │
//  │   ↓                                    │
//  │  InputSystem.handle_event()            │
//  │   ├─ key-state table                   │
//  │   ├─ joystick debounce                 │
//  │   └─ InputCallbacks (game logic)       │
//  │                                        │
//  │  VideoSystem ── WinitBackend ── Window │
//  └────────────────────────────────────────┘
// ```
//
// Key Design Decisions:
// - **Fully synchronous dispatch**: every input event runs through the
//   normalizer and into the callbacks before the next event is read.
//   There is no internal queue and no worker thread.
// - **Window creation in `resumed()`**: Winit only hands out window
//   creation capability inside the event loop, so the video state
//   machine is driven from there rather than from `run()`.
// - **Fatal errors are surfaced, not executed**: a failed window create
//   stores the error, exits the loop, and `run()` returns it. The
//   caller decides whether to terminate.
// - **Main thread requirement**: Winit mandates main thread on
//   macOS/iOS, so this runs on the thread that called `Platform::run()`.
//
//=========================================================================

//=== Submodules ==========================================================

mod event_mapper;

//=== Standard Library Imports ============================================

use std::sync::atomic::{AtomicU32, Ordering};

//=== External Crates =====================================================

use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalPosition},
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{CursorGrabMode, Fullscreen, Window, WindowAttributes},
};

//=== Internal Imports ====================================================

use crate::core::audio::{AudioBackend, AudioSystem};
use crate::core::input::joystick::JoystickProvider;
use crate::core::input::{event::RawEvent, InputCallbacks, InputSystem};
use crate::core::video::{
    ChannelBits, CreatedWindow, PixelFormat, VideoBackend, VideoError, VideoSystem, WindowId,
    WindowRequest,
};
use event_mapper::EventMapper;

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
///
/// These are fatal: if the event loop can't be created or the window
/// lifecycle fails, the engine cannot run.
#[derive(Debug)]
pub enum PlatformError {
    /// Failed to create event loop (rare, indicates OS-level issue).
    EventLoopCreation(winit::error::EventLoopError),

    /// Event loop execution error (rare, indicates corruption).
    EventLoopExecution(winit::error::EventLoopError),

    /// Window or rendering-context lifecycle failure.
    Video(VideoError),
}

//--- Trait Implementations -----------------------------------------------

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EventLoopCreation(e) => write!(f, "Event loop creation failed: {}", e),
            Self::EventLoopExecution(e) => write!(f, "Event loop error: {}", e),
            Self::Video(e) => write!(f, "Video error: {}", e),
        }
    }
}

impl std::error::Error for PlatformError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::EventLoopCreation(e) | Self::EventLoopExecution(e) => Some(e),
            Self::Video(e) => Some(e),
        }
    }
}

impl From<VideoError> for PlatformError {
    fn from(e: VideoError) -> Self {
        Self::Video(e)
    }
}

//=== WinitBackend ========================================================

/// Monotonic window id source shared across backend instances.
static NEXT_WINDOW_ID: AtomicU32 = AtomicU32::new(1);

/// [`VideoBackend`] implementation over Winit.
///
/// Winit has no separate video subsystem to bring up or tear down, so
/// `init_subsystem`/`quit_subsystem` are no-ops. Framebuffer attribute
/// requests are recorded for the channel-depth report but Winit chooses
/// the actual surface format. Window creation needs an
/// [`ActiveEventLoop`]; a detached backend (pointer operations between
/// loop callbacks) carries `None` and refuses creation.
struct WinitBackend<'a> {
    event_loop: Option<&'a ActiveEventLoop>,
    window: &'a mut Option<Window>,
    format: Option<PixelFormat>,
}

impl<'a> WinitBackend<'a> {
    fn new(event_loop: &'a ActiveEventLoop, window: &'a mut Option<Window>) -> Self {
        Self {
            event_loop: Some(event_loop),
            window,
            format: None,
        }
    }

    /// Backend without creation capability, for pointer operations
    /// outside the event-loop callbacks.
    fn detached(window: &'a mut Option<Window>) -> Self {
        Self {
            event_loop: None,
            window,
            format: None,
        }
    }
}

impl VideoBackend for WinitBackend<'_> {
    fn init_subsystem(&mut self) -> Result<(), VideoError> {
        debug!(target: "platform", "Video subsystem ready (winit)");
        Ok(())
    }

    fn apply_pixel_format(&mut self, format: &PixelFormat) {
        trace!(target: "platform", "Framebuffer request: {:?}", format);
        self.format = Some(*format);
    }

    fn create_window(&mut self, request: &WindowRequest<'_>) -> Result<CreatedWindow, VideoError> {
        let event_loop = self
            .event_loop
            .ok_or_else(|| VideoError::WindowCreation("no active event loop".into()))?;

        let mut attrs = WindowAttributes::default()
            .with_title(request.title)
            .with_inner_size(LogicalSize::new(request.width, request.height));
        if request.fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = event_loop
            .create_window(attrs)
            .map_err(|e| VideoError::WindowCreation(e.to_string()))?;

        info!(
            target: "platform",
            "Window created: {}x{} @ {}x DPI",
            window.inner_size().width,
            window.inner_size().height,
            window.scale_factor()
        );
        window.request_redraw();
        *self.window = Some(window);

        let format = self.format.unwrap_or(request.pixel_format);
        Ok(CreatedWindow {
            id: WindowId(NEXT_WINDOW_ID.fetch_add(1, Ordering::Relaxed)),
            channel_bits: ChannelBits {
                red: format.red,
                green: format.green,
                blue: format.blue,
                alpha: format.alpha,
            },
            // Multitexturing has been universal for two decades; any
            // context Winit can surface has it.
            has_multitexture: true,
        })
    }

    fn destroy_window(&mut self, _id: WindowId) {
        // Dropping the handle closes the OS window.
        *self.window = None;
    }

    fn quit_subsystem(&mut self) {
        debug!(target: "platform", "Video subsystem released (winit)");
    }

    fn swap_buffers(&mut self) {
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }

    fn warp_pointer(&mut self, x: i32, y: i32) {
        if let Some(window) = self.window.as_ref() {
            if let Err(e) = window.set_cursor_position(PhysicalPosition::new(x, y)) {
                trace!(target: "platform", "Cursor warp unsupported: {}", e);
            }
        }
    }

    fn set_pointer_grab(&mut self, grabbed: bool) {
        let Some(window) = self.window.as_ref() else { return };
        let mode = if grabbed {
            CursorGrabMode::Confined
        } else {
            CursorGrabMode::None
        };
        if let Err(e) = window.set_cursor_grab(mode) {
            warn!(target: "platform", "Cursor grab failed: {}", e);
        }
    }

    fn set_pointer_visible(&mut self, visible: bool) {
        if let Some(window) = self.window.as_ref() {
            window.set_cursor_visible(visible);
        }
    }

    fn set_relative_mouse(&mut self, enabled: bool) {
        let Some(window) = self.window.as_ref() else { return };
        // Relative mode is a locked, hidden cursor; confinement is the
        // fallback where locking is unsupported.
        let mode = if enabled {
            CursorGrabMode::Locked
        } else {
            CursorGrabMode::None
        };
        if let Err(e) = window.set_cursor_grab(mode) {
            if enabled {
                if let Err(e) = window.set_cursor_grab(CursorGrabMode::Confined) {
                    warn!(target: "platform", "Relative mouse mode failed: {}", e);
                }
            } else {
                warn!(target: "platform", "Cursor release failed: {}", e);
            }
        }
        window.set_cursor_visible(!enabled);
    }
}

//=== Platform ============================================================

/// Window manager and synchronous input dispatcher.
///
/// Owns the video, audio, and input subsystems and drives them from the
/// Winit event loop on the main thread. Game logic receives input
/// through the [`InputCallbacks`] implementation passed at construction.
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(title, video, callbacks)` with a
///    pre-configured [`VideoSystem`] (dimensions, display flags)
/// 2. **Execution**: `platform.run()` starts the event loop; the window
///    is created on the first `resumed()` callback
/// 3. **Event processing**: every input event is mapped and dispatched
///    through the normalizer before the next is read
/// 4. **Shutdown**: window close tears down the video state machine and
///    exits the loop; `run()` returns the callbacks for state recovery
///
/// # Thread Safety
///
/// This type is NOT Send/Sync - it must remain on the main thread.
pub struct Platform<C: InputCallbacks> {
    title: String,

    video: VideoSystem,
    audio: AudioSystem,
    input: InputSystem,
    callbacks: C,

    /// OS window handle (None until `resumed()` called).
    window: Option<Window>,

    /// Live window id as reported by the video state machine.
    window_id: Option<WindowId>,

    mapper: EventMapper,

    /// First fatal error encountered inside the loop; returned by `run()`.
    fatal: Option<PlatformError>,
}

impl<C: InputCallbacks> Platform<C> {
    //--- Construction -----------------------------------------------------

    /// Creates a new platform instance.
    ///
    /// Does not create the window yet; that happens lazily in
    /// `resumed()` once the event loop is running.
    pub fn new(title: impl Into<String>, video: VideoSystem, callbacks: C) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            title: title.into(),
            video,
            audio: AudioSystem::new(),
            input: InputSystem::new(),
            callbacks,
            window: None,
            window_id: None,
            mapper: EventMapper::new(),
            fatal: None,
        }
    }

    //--- Subsystem Bootstrap ----------------------------------------------

    /// Brings up the audio subsystem; a failure logs and degrades.
    pub fn init_audio<B: AudioBackend>(&mut self, backend: &mut B) {
        self.audio.init(backend);
    }

    /// Whether audio init succeeded.
    pub fn audio_available(&self) -> bool {
        self.audio.is_available()
    }

    /// Discovers and opens joystick devices up to the configured cap.
    /// Returns the number of slots opened.
    pub fn init_joysticks<P: JoystickProvider>(&mut self, provider: &mut P) -> usize {
        self.input.init_joysticks(provider)
    }

    //--- Subsystem Access -------------------------------------------------

    pub fn input(&self) -> &InputSystem {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputSystem {
        &mut self.input
    }

    pub fn video(&self) -> &VideoSystem {
        &self.video
    }

    pub fn callbacks_mut(&mut self) -> &mut C {
        &mut self.callbacks
    }

    //--- Event Injection --------------------------------------------------

    /// Dispatches a raw event through the normalizer, exactly as if it
    /// had arrived from the OS. Joystick backends polled outside the
    /// Winit loop feed their events in here.
    pub fn inject_event(&mut self, event: RawEvent) {
        self.input.handle_event(event, &mut self.callbacks);
    }

    //--- Pointer Operations -----------------------------------------------

    /// Warps the pointer to the window origin and clears the
    /// accumulated mouse delta. The warp itself produces no motion.
    pub fn warp_pointer_to_origin(&mut self) {
        let mut backend = WinitBackend::detached(&mut self.window);
        self.video.warp_pointer(&mut backend, 0, 0);
        self.input.warp_mouse_to_origin();
        self.mapper.reset_cursor_anchor();
    }

    pub fn set_pointer_grab(&mut self, grabbed: bool) {
        let mut backend = WinitBackend::detached(&mut self.window);
        self.video.set_pointer_grab(&mut backend, grabbed);
    }

    pub fn set_pointer_visible(&mut self, visible: bool) {
        let mut backend = WinitBackend::detached(&mut self.window);
        self.video.set_pointer_visible(&mut backend, visible);
    }

    pub fn set_relative_mouse(&mut self, enabled: bool) {
        let mut backend = WinitBackend::detached(&mut self.window);
        self.video.set_relative_mouse(&mut backend, enabled);
    }

    pub fn swap_buffers(&mut self) {
        let mut backend = WinitBackend::detached(&mut self.window);
        self.video.swap_buffers(&mut backend);
    }

    //--- Execution --------------------------------------------------------

    /// Runs the event loop until the window is closed or a fatal error
    /// occurs. Returns the callbacks on clean shutdown so the caller
    /// can recover game state.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop can't be created, if
    /// window creation fails inside the loop, or if the loop itself
    /// errors out.
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread (macOS/iOS Winit requirement).
    pub fn run(mut self) -> Result<C, PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;
        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)?;

        match self.fatal.take() {
            Some(e) => Err(e),
            None => Ok(self.callbacks),
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn tear_down_window(&mut self) {
        if let Some(id) = self.window_id.take() {
            let mut backend = WinitBackend::detached(&mut self.window);
            if let Err(e) = self.video.destroy(&mut backend, id) {
                warn!(target: "platform", "Window teardown: {}", e);
            }
        }
    }
}

//=== Winit Integration ===================================================

impl<C: InputCallbacks> ApplicationHandler for Platform<C> {
    /// Called when the app becomes active (startup or mobile resume).
    ///
    /// Drives the video state machine through window creation. On
    /// mobile this may fire again after a suspend/resume cycle; the
    /// existing window is kept.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let mut window = None;
        let mut backend = WinitBackend::new(event_loop, &mut window);
        match self.video.create(&mut backend, &self.title) {
            Ok(id) => {
                self.window = window;
                self.window_id = Some(id);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.fatal = Some(PlatformError::Video(e));
                event_loop.exit();
            }
        }
    }

    /// Handles per-window events.
    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.tear_down_window();
                event_loop.exit();
            }

            WindowEvent::RedrawRequested => {
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {
                // Synchronous dispatch: the callbacks run before the
                // next event is read.
                let raw = self.mapper.map_window_event(&event);
                if raw != RawEvent::Unidentified {
                    self.input.handle_event(raw, &mut self.callbacks);
                }
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::NullCallbacks;
    use crate::core::input::event::KeyCode;

    //=====================================================================
    // PlatformError Tests
    //=====================================================================

    #[test]
    fn platform_error_is_error_trait() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<PlatformError>();
    }

    #[test]
    fn video_error_converts_to_platform_error() {
        let err: PlatformError = VideoError::WindowAlreadyExists.into();
        assert!(matches!(err, PlatformError::Video(VideoError::WindowAlreadyExists)));
        assert!(format!("{}", err).contains("window already exists"));
    }

    //=====================================================================
    // Platform Tests
    //=====================================================================

    #[test]
    fn platform_creation_defers_window() {
        let platform = Platform::new("game", VideoSystem::new(), NullCallbacks);
        assert!(platform.window.is_none(), "Window should be created lazily");
        assert!(!platform.audio_available());
    }

    #[test]
    fn injected_events_reach_input_system() {
        let mut platform = Platform::new("game", VideoSystem::new(), NullCallbacks);

        platform.inject_event(RawEvent::KeyDown(KeyCode::Space));

        assert!(platform.input().key_state(KeyCode::Space.code()).is_down());
    }

    #[test]
    fn warp_resets_mouse_delta() {
        let mut platform = Platform::new("game", VideoSystem::new(), NullCallbacks);

        platform.inject_event(RawEvent::MouseMoved { x: 10.0, y: 10.0, dx: 4.0, dy: 3.0 });
        assert_eq!(platform.input().mouse_delta(), (4.0, 3.0));

        platform.warp_pointer_to_origin();
        assert_eq!(platform.input().mouse_delta(), (0.0, 0.0));
    }
}
