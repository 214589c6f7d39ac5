//! binwave - hear and see any binary file.
//! Uses winit + glutin + glow + imgui-rs for the GUI.

mod app;
mod ui;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use app::App;
use bw_master::{ConfigArgs, Controller};
use clap::Parser;
use ui::{GuiState, WindowRequest};

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::WindowId;

#[derive(Parser)]
#[command(name = "binwave", version, about = "Play any file as sound and colour")]
struct Args {
    /// File to open; a file picker is shown when omitted
    path: Option<PathBuf>,

    #[command(flatten)]
    config: ConfigArgs,

    /// Start in fullscreen
    #[arg(long)]
    fullscreen: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = match args.config.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    let Some(path) = args.path.or_else(|| rfd::FileDialog::new().pick_file()) else {
        log::info!("no file chosen");
        return;
    };

    let mut controller = match Controller::open(&path, config) {
        Ok(controller) => controller,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    controller.start_audio();

    let config = controller.config();
    let size = [
        config.frame_width as f32 * config.window_scale,
        config.frame_height as f32 * config.window_scale,
    ];
    let frame_interval = Duration::from_secs_f64(1.0 / config.visual_fps_cap);

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            eprintln!("cannot open a window: {}", e);
            std::process::exit(1);
        }
    };

    let mut viewer = Viewer {
        pending: Some(GuiState::new(controller)),
        app: None,
        size,
        fullscreen: args.fullscreen,
        frame_interval,
        next_frame: Instant::now(),
    };

    if let Err(e) = event_loop.run_app(&mut viewer) {
        log::error!("event loop failed: {}", e);
    }
}

struct Viewer {
    /// GUI state waiting for the window to exist
    pending: Option<GuiState>,
    app: Option<App>,
    size: [f32; 2],
    fullscreen: bool,
    /// Minimum time between redraws
    frame_interval: Duration,
    next_frame: Instant,
}

impl ApplicationHandler for Viewer {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.is_some() {
            return;
        }
        let Some(gui) = self.pending.take() else {
            return;
        };

        let mut app = App::new(event_loop, gui, self.size[0], self.size[1]);
        if self.fullscreen {
            app.set_fullscreen(true);
        }
        self.app = Some(app);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(app) = &mut self.app else { return };

        let wrapped: winit::event::Event<()> = winit::event::Event::WindowEvent {
            window_id,
            event: event.clone(),
        };
        app.handle_event(&wrapped);

        match event {
            WindowEvent::CloseRequested => {
                app.gui.controller.stop_audio();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => app.handle_resize(size),
            WindowEvent::RedrawRequested => {
                for request in app.render_frame() {
                    match request {
                        WindowRequest::Fullscreen(on) => app.set_fullscreen(on),
                        WindowRequest::Quit => {
                            app.gui.controller.stop_audio();
                            event_loop.exit();
                        }
                    }
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(app) = &self.app else { return };

        // Redraws are capped; audio keeps its own pace
        let now = Instant::now();
        if now >= self.next_frame {
            app.window().request_redraw();
            self.next_frame = now + self.frame_interval;
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame));
    }
}
