use anyhow::Result;
use clap::Parser;
use egui::Context as EguiContext;
use skiff_common::SceneConfig;
use skiff_input::{Key, KeyEvent, command_for};
use skiff_kernel::{CameraRig, FixedTicker, SceneCommand, SceneState};
use skiff_render::FramePlan;
use skiff_render_wgpu::{GpuContext, RenderError, WgpuRenderer};
use skiff_tools::SceneInspector;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "skiff-desktop", about = "Interactive boat scene")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Scene configuration file (YAML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Initial camera rig (freeRoam, overhead, chase, original)
    #[arg(long, default_value = "freeRoam")]
    rig: CameraRig,
}

fn map_key(code: KeyCode) -> Option<Key> {
    Some(match code {
        KeyCode::Digit1 | KeyCode::Numpad1 => Key::Digit1,
        KeyCode::Digit2 | KeyCode::Numpad2 => Key::Digit2,
        KeyCode::Digit3 | KeyCode::Numpad3 => Key::Digit3,
        KeyCode::KeyR => Key::R,
        KeyCode::ArrowUp => Key::ArrowUp,
        KeyCode::ArrowDown => Key::ArrowDown,
        KeyCode::ArrowLeft => Key::ArrowLeft,
        KeyCode::ArrowRight => Key::ArrowRight,
        KeyCode::KeyA => Key::A,
        KeyCode::KeyD => Key::D,
        KeyCode::KeyX => Key::X,
        KeyCode::KeyZ => Key::Z,
        KeyCode::KeyQ => Key::Q,
        KeyCode::KeyE => Key::E,
        KeyCode::KeyF => Key::F,
        _ => return None,
    })
}

/// Application state.
struct AppState {
    scene: SceneState,
    ticker: FixedTicker,
    last_update: Instant,
    show_hud: bool,
}

impl AppState {
    fn new(config: &SceneConfig, rig: CameraRig) -> Self {
        let mut scene = SceneState::new(config);
        scene.apply(SceneCommand::SelectRig(rig));
        Self {
            scene,
            ticker: FixedTicker::new(config.tick_period()),
            last_update: Instant::now(),
            show_hud: true,
        }
    }

    /// Run every fixed tick that has come due since the last call.
    fn update(&mut self) {
        let now = Instant::now();
        let ticks = self.ticker.advance(now - self.last_update);
        self.last_update = now;
        for _ in 0..ticks {
            self.scene.tick();
        }
    }

    fn handle_key(&mut self, key: Key, pressed: bool) {
        let event = if pressed {
            KeyEvent::pressed(key)
        } else {
            KeyEvent::released(key)
        };
        if let Some(command) = command_for(event) {
            self.scene.apply(command);
        }
    }

    fn draw_ui(&self, ctx: &EguiContext) {
        if !self.show_hud {
            return;
        }

        let summary = SceneInspector::summary(&self.scene);
        let boat = &summary.boat;
        let camera = &summary.camera;

        egui::Window::new("Skiff")
            .default_pos([12.0, 12.0])
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(format!("Tick: {}  Frame: {}", summary.ticks, summary.frames));
                ui.separator();
                ui.heading("Camera");
                ui.label(format!("Rig: {}", camera.rig));
                ui.label(format!("FOV: {:.0}°", camera.fov_degrees));
                ui.label(format!("Dolly: {:.1}", camera.dolly));
                ui.label(format!(
                    "Look at: {}",
                    if camera.centered { "origin" } else { "boat" }
                ));
                ui.separator();
                ui.heading("Boat");
                ui.label(format!("Position: ({:.2}, {:.2})", boat.position[0], boat.position[2]));
                ui.label(format!("Heading: {:.0}°", boat.heading));
                ui.label(format!("Fan: {:.0}° @ {:.0}", boat.fan_angle, boat.fan_speed));
                ui.label(format!("Rudder: {:.0}°", boat.rudder_angle));
                ui.label(format!("Searchlight: {:.0}°", boat.searchlight_angle));
                ui.separator();
                ui.small("Arrows: drive | A/D: light | 1/2/3/R: rig");
                ui.small("X/Z: zoom | Q/E: dolly | F: look target | F1: HUD");
            });
    }
}

/// Everything that exists only once a window is up.
struct Graphics {
    window: Arc<Window>,
    gpu: GpuContext,
    renderer: WgpuRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl Graphics {
    fn new(
        event_loop: &ActiveEventLoop,
        config: &SceneConfig,
        ctx: &EguiContext,
    ) -> Result<Self, RenderError> {
        let attrs = Window::default_attributes()
            .with_title("Skiff")
            .with_inner_size(PhysicalSize::new(config.window.width, config.window.height));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| RenderError::Window(e.to_string()))?,
        );

        let size = window.inner_size();
        let gpu = GpuContext::new(window.clone(), size.width, size.height)?;
        let (width, height) = gpu.size();
        let renderer = WgpuRenderer::new(&gpu.device, gpu.format(), width, height);

        let egui_winit = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&gpu.device, gpu.format(), None, 1, false);

        Ok(Self {
            window,
            gpu,
            renderer,
            egui_winit,
            egui_renderer,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(width, height);
        let (width, height) = self.gpu.size();
        self.renderer.resize(&self.gpu.device, width, height);
    }

    fn render(&mut self, state: &mut AppState, ctx: &EguiContext) {
        let output = match self.gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.gpu.reconfigure();
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());

        state.scene.advance_frame();
        let plan = FramePlan::compute(&state.scene, self.gpu.aspect());
        self.renderer.render(&self.gpu.device, &self.gpu.queue, &view, &plan);

        let raw_input = self.egui_winit.take_egui_input(&self.window);
        let full_output = ctx.run(raw_input, |ctx| state.draw_ui(ctx));
        self.egui_winit.handle_platform_output(&self.window, full_output.platform_output);

        let paint_jobs = ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        let (width, height) = self.gpu.size();
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [width, height],
            pixels_per_point: full_output.pixels_per_point,
        };

        let device = &self.gpu.device;
        let queue = &self.gpu.queue;
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer.update_texture(device, queue, *id, image_delta);
        }
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("egui_encoder"),
        });
        self.egui_renderer.update_buffers(
            device,
            queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            self.egui_renderer.render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        output.present();
    }
}

struct GpuApp {
    config: SceneConfig,
    state: AppState,
    graphics: Option<Graphics>,
    egui_ctx: EguiContext,
    fatal: Option<RenderError>,
}

impl GpuApp {
    fn new(config: SceneConfig, rig: CameraRig) -> Self {
        let state = AppState::new(&config, rig);
        Self {
            config,
            state,
            graphics: None,
            egui_ctx: EguiContext::default(),
            fatal: None,
        }
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.graphics.is_some() {
            return;
        }

        match Graphics::new(event_loop, &self.config, &self.egui_ctx) {
            Ok(graphics) => {
                graphics.window.request_redraw();
                self.graphics = Some(graphics);
                self.state.last_update = Instant::now();
            }
            Err(e) => {
                tracing::error!("cannot start renderer: {e}");
                eprintln!("skiff-desktop: {e}");
                self.fatal = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(graphics) = self.graphics.as_mut() else {
            return;
        };

        let response = graphics.egui_winit.on_window_event(&graphics.window, &event);
        if response.repaint {
            graphics.window.request_redraw();
        }
        if response.consumed {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Focused(false) => {
                // Key-up events are not delivered while unfocused.
                self.state.scene.release_held_input();
            }
            WindowEvent::Resized(new_size) => {
                graphics.resize(new_size.width, new_size.height);
                graphics.window.request_redraw();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                let pressed = event.state == ElementState::Pressed;
                match code {
                    KeyCode::Escape if pressed => event_loop.exit(),
                    KeyCode::F1 if pressed && !event.repeat => {
                        self.state.show_hud = !self.state.show_hud;
                        graphics.window.request_redraw();
                    }
                    // Auto-repeat presses are forwarded so a held arrow keeps
                    // the boat moving.
                    _ => match map_key(code) {
                        Some(key) => self.state.handle_key(key, pressed),
                        None => tracing::trace!("unbound key {code:?}"),
                    },
                }
            }
            WindowEvent::RedrawRequested => {
                graphics.render(&mut self.state, &self.egui_ctx);
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.state.update();
        if self.state.scene.take_redraw() {
            if let Some(graphics) = &self.graphics {
                graphics.window.request_redraw();
            }
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(
            Instant::now() + self.state.ticker.until_next(),
        ));
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = SceneConfig::load_or_default(cli.config.as_deref())?;
    config.validate()?;

    tracing::info!("skiff-desktop starting with rig {}", cli.rig);

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = GpuApp::new(config, cli.rig);
    event_loop.run_app(&mut app)?;

    if let Some(e) = app.fatal {
        return Err(e.into());
    }
    Ok(())
}
