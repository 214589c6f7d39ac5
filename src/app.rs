//! App struct owning the GL/imgui stack.

use crate::ui::{self, GuiState, WindowRequest};
use std::num::NonZeroU32;

use glow::HasContext;
use glutin::config::ConfigTemplateBuilder;
use glutin::context::{ContextApi, ContextAttributesBuilder, Version};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{SurfaceAttributesBuilder, WindowSurface};
use glutin_winit::DisplayBuilder;

use imgui_glow_renderer::AutoRenderer;
use imgui_winit_support::{HiDpiMode, WinitPlatform};

use raw_window_handle::HasWindowHandle;
use winit::dpi::LogicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Fullscreen, Window, WindowAttributes};

struct GlObjects {
    window: Window,
    surface: glutin::surface::Surface<WindowSurface>,
    context: glutin::context::PossiblyCurrentContext,
}

pub struct App {
    gl: GlObjects,
    imgui: imgui::Context,
    platform: WinitPlatform,
    renderer: AutoRenderer,
    /// Title currently shown by the window
    title: String,
    pub gui: GuiState,
}

impl App {
    /// Create the app from an active event loop (call in `resumed()`).
    ///
    /// The window opens at `width × height` logical pixels.
    pub fn new(event_loop: &ActiveEventLoop, gui: GuiState, width: f32, height: f32) -> Self {
        let mut imgui = create_imgui_context();
        let platform = WinitPlatform::new(&mut imgui);
        let (window, gl_config) = create_gl_window(event_loop, width, height);

        let mut app = Self::init_gl(imgui, platform, window, &gl_config, gui);
        app.platform
            .attach_window(app.imgui.io_mut(), &app.gl.window, HiDpiMode::Default);
        app
    }

    fn init_gl(
        mut imgui: imgui::Context,
        platform: WinitPlatform,
        window: Window,
        gl_config: &glutin::config::Config,
        gui: GuiState,
    ) -> Self {
        let (surface, context) = create_gl_surface(&window, gl_config);
        let glow_ctx = create_glow_context(gl_config);
        let renderer =
            AutoRenderer::new(glow_ctx, &mut imgui).expect("Failed to create imgui renderer");

        Self {
            gl: GlObjects {
                window,
                surface,
                context,
            },
            imgui,
            platform,
            renderer,
            title: String::new(),
            gui,
        }
    }

    pub fn window(&self) -> &Window {
        &self.gl.window
    }

    /// Handle a winit event (forward to imgui platform).
    pub fn handle_event(&mut self, event: &winit::event::Event<()>) {
        self.platform
            .handle_event(self.imgui.io_mut(), &self.gl.window, event);
    }

    /// Handle window resize.
    pub fn handle_resize(&self, size: winit::dpi::PhysicalSize<u32>) {
        if let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) {
            self.gl.surface.resize(&self.gl.context, width, height);
        }
    }

    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        let mode = fullscreen.then_some(Fullscreen::Borderless(None));
        self.gl.window.set_fullscreen(mode);
        self.gui.fullscreen = fullscreen;
    }

    /// Render one frame: build UI, render to GL, swap buffers.
    ///
    /// Returns the window changes the UI asked for.
    pub fn render_frame(&mut self) -> Vec<WindowRequest> {
        self.platform
            .prepare_frame(self.imgui.io_mut(), &self.gl.window)
            .expect("prepare_frame failed");

        let ui = self.imgui.new_frame();
        let requests = ui::build_ui(ui, &mut self.gui);
        self.platform.prepare_render(ui, &self.gl.window);

        let draw_data = self.imgui.render();

        unsafe {
            let gl_ctx = self.renderer.gl_context();
            gl_ctx.clear_color(0.0, 0.0, 0.0, 1.0);
            gl_ctx.clear(glow::COLOR_BUFFER_BIT);
        }

        self.renderer
            .render(draw_data)
            .expect("imgui render failed");

        self.gl
            .surface
            .swap_buffers(&self.gl.context)
            .expect("swap_buffers failed");

        if self.gui.title != self.title {
            self.gl.window.set_title(&self.gui.title);
            self.title.clone_from(&self.gui.title);
        }
        requests
    }
}

fn create_imgui_context() -> imgui::Context {
    let mut imgui = imgui::Context::create();
    imgui.set_ini_filename(None);
    imgui.style_mut().use_dark_colors();
    // Held rate and volume keys step about ten times a second
    imgui.io_mut().key_repeat_rate = 0.1;
    imgui.fonts().add_font(&[imgui::FontSource::DefaultFontData {
        config: Some(imgui::FontConfig {
            size_pixels: 14.0,
            ..Default::default()
        }),
    }]);
    imgui
}

fn create_gl_window(
    event_loop: &ActiveEventLoop,
    width: f32,
    height: f32,
) -> (Window, glutin::config::Config) {
    let window_attrs = WindowAttributes::default()
        .with_inner_size(LogicalSize::new(width, height))
        .with_title("binwave");

    let template = ConfigTemplateBuilder::new();
    let display_builder = DisplayBuilder::new().with_window_attributes(Some(window_attrs));

    let (window, gl_config) = display_builder
        .build(event_loop, template, |configs| {
            configs
                .reduce(|a, b| {
                    if a.num_samples() > b.num_samples() {
                        a
                    } else {
                        b
                    }
                })
                .unwrap()
        })
        .expect("Failed to create GL window");

    (window.expect("No window created"), gl_config)
}

fn create_gl_surface(
    window: &Window,
    gl_config: &glutin::config::Config,
) -> (
    glutin::surface::Surface<WindowSurface>,
    glutin::context::PossiblyCurrentContext,
) {
    let raw_handle = window
        .window_handle()
        .expect("Failed to get window handle")
        .as_raw();

    let gl_display = gl_config.display();

    let context_attrs = ContextAttributesBuilder::new()
        .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
        .build(Some(raw_handle));

    let gl_context = unsafe {
        gl_display
            .create_context(gl_config, &context_attrs)
            .expect("Failed to create GL context")
    };

    let size = window.inner_size();
    let surface_attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
        raw_handle,
        NonZeroU32::new(size.width.max(1)).unwrap(),
        NonZeroU32::new(size.height.max(1)).unwrap(),
    );

    let surface = unsafe {
        gl_display
            .create_window_surface(gl_config, &surface_attrs)
            .expect("Failed to create GL surface")
    };

    let context = gl_context
        .make_current(&surface)
        .expect("Failed to make GL context current");

    (surface, context)
}

fn create_glow_context(gl_config: &glutin::config::Config) -> glow::Context {
    let gl_display = gl_config.display();
    unsafe { glow::Context::from_loader_function_cstr(|s| gl_display.get_proc_address(s)) }
}

