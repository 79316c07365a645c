use anyhow::{Context, Result, anyhow};
use clap::Parser;
use egui::Context as EguiContext;
use flycam_camera::{Camera, CameraConfig, Projection};
use flycam_input::{Action, EventQueue, FlyController, InputEvent, Key};
use flycam_render::{FrameView, Scene, SceneKind};
use flycam_render_wgpu::WgpuRenderer;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{
    DeviceEvent, ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent,
};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window, WindowId};

/// Frame times above this are clamped so a stall does not teleport the camera.
const MAX_FRAME_TIME: f32 = 0.1;
/// Scroll lines per pixel for touchpads reporting pixel deltas.
const LINES_PER_PIXEL: f32 = 1.0 / 20.0;

#[derive(Parser)]
#[command(name = "flycam-desktop", about = "First-person fly camera demo")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Demo scene to show (triangle or cubes)
    #[arg(long, default_value = "cubes")]
    scene: SceneKind,

    /// Camera config file (YAML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Start with free-fly control disabled (toggle with Tab)
    #[arg(long)]
    no_fly: bool,

    /// Initial window width
    #[arg(long, default_value = "800")]
    width: u32,

    /// Initial window height
    #[arg(long, default_value = "600")]
    height: u32,
}

/// Application state: everything that is not a GPU resource.
struct AppState {
    camera: Camera,
    projection: Projection,
    controller: FlyController,
    events: EventQueue,
    scene: Scene,
    show_hud: bool,
    last_frame: Instant,
    frame_time: f32,
}

impl AppState {
    fn new(cli: &Cli) -> Result<Self> {
        let config = match &cli.config {
            Some(path) => CameraConfig::load(path)
                .with_context(|| format!("loading camera config {}", path.display()))?,
            None => CameraConfig::default(),
        };
        let camera = Camera::from_config(&config)?;

        let mut controller = FlyController::default();
        controller.set_enabled(!cli.no_fly);

        Ok(Self {
            camera,
            projection: Projection::new(cli.width, cli.height),
            controller,
            events: EventQueue::new(),
            scene: Scene::new(cli.scene),
            show_hud: true,
            last_frame: Instant::now(),
            frame_time: 0.0,
        })
    }

    /// Apply all input queued since the last frame and return the
    /// application-level actions it produced.
    fn update(&mut self) -> Vec<Action> {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32().min(MAX_FRAME_TIME);
        self.last_frame = now;
        self.frame_time = dt;

        self.controller
            .update(&mut self.events, &mut self.camera, dt)
            .into_iter()
            .filter(|a| !a.is_camera_action())
            .collect()
    }

    fn frame_view(&self) -> FrameView {
        FrameView::from_camera(&self.camera, &self.projection)
    }

    fn draw_hud(&mut self, ctx: &EguiContext) {
        if !self.show_hud {
            return;
        }

        egui::Window::new("Camera")
            .default_pos([10.0, 10.0])
            .resizable(false)
            .show(ctx, |ui| {
                let p = self.camera.position;
                ui.label(format!("Scene: {}", self.scene.kind));
                ui.label(format!("Position: ({:.2}, {:.2}, {:.2})", p.x, p.y, p.z));
                ui.label(format!(
                    "Yaw: {:.1}  Pitch: {:.1}",
                    self.camera.yaw(),
                    self.camera.pitch()
                ));
                ui.label(format!("FOV: {:.1}", self.camera.zoom()));
                ui.label(format!("Frame: {:.2} ms", self.frame_time * 1000.0));
                ui.separator();

                ui.add(
                    egui::Slider::new(&mut self.camera.movement_speed, 0.5..=20.0)
                        .text("speed"),
                );
                ui.add(
                    egui::Slider::new(&mut self.camera.mouse_sensitivity, 0.01..=0.5)
                        .text("sensitivity"),
                );
                ui.checkbox(&mut self.controller.constrain_pitch, "Constrain pitch");

                ui.separator();
                let mode = if self.controller.enabled() {
                    "flying"
                } else {
                    "cursor free"
                };
                ui.small(format!("Mode: {mode}"));
                ui.small("WASD/Arrows: Move | Shift: Sprint | Scroll: Zoom");
                ui.small("Tab: Toggle fly | F1: Toggle HUD | Esc: Quit");
            });
    }
}

/// Translate a winit key code into an engine key. Unbound keys are dropped.
fn map_key(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::KeyW => Key::W,
        KeyCode::KeyA => Key::A,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyD => Key::D,
        KeyCode::ArrowUp => Key::Up,
        KeyCode::ArrowDown => Key::Down,
        KeyCode::ArrowLeft => Key::Left,
        KeyCode::ArrowRight => Key::Right,
        KeyCode::ShiftLeft => Key::LeftShift,
        KeyCode::Tab => Key::Tab,
        KeyCode::Escape => Key::Escape,
        KeyCode::F1 => Key::F1,
        _ => return None,
    };
    Some(key)
}

/// Grab and hide the cursor while flying, release it otherwise.
fn apply_cursor_mode(window: &Window, flying: bool) {
    if flying {
        let grabbed = window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
        if let Err(e) = grabbed {
            tracing::warn!("cursor grab unavailable: {e}");
        }
    } else if let Err(e) = window.set_cursor_grab(CursorGrabMode::None) {
        tracing::warn!("cursor release failed: {e}");
    }
    window.set_cursor_visible(!flying);
}

/// GPU and window resources, created once the event loop is running.
struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: WgpuRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl Gpu {
    fn new(
        event_loop: &ActiveEventLoop,
        size: PhysicalSize<u32>,
        scene: &Scene,
        egui_ctx: &EguiContext,
    ) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title("flycam")
            .with_inner_size(size);
        let window = Arc::new(event_loop.create_window(attrs)?);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window.clone())?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| anyhow!("no suitable GPU adapter"))?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("flycam_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or_else(|| anyhow!("surface reports no formats"))?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer =
            WgpuRenderer::new(&device, surface_format, config.width, config.height, scene);

        let egui_winit = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
            egui_winit,
            egui_renderer,
        })
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        self.config.width = size.width.max(1);
        self.config.height = size.height.max(1);
        self.surface.configure(&self.device, &self.config);
        self.renderer.resize(&self.device, self.config.width, self.config.height);
    }

    fn draw_overlay(
        &mut self,
        egui_ctx: &EguiContext,
        state: &mut AppState,
        target: &wgpu::TextureView,
    ) {
        let raw_input = self.egui_winit.take_egui_input(&self.window);
        let full_output = egui_ctx.run(raw_input, |ctx| {
            state.draw_hud(ctx);
        });
        self.egui_winit
            .handle_platform_output(&self.window, full_output.platform_output);

        let paint_jobs = egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer.update_texture(&self.device, &self.queue, *id, image_delta);
        }
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: target,
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
        self.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }
}

struct GpuApp {
    state: AppState,
    gpu: Option<Gpu>,
    egui_ctx: EguiContext,
    window_size: PhysicalSize<u32>,
    focused: bool,
}

impl GpuApp {
    fn new(state: AppState, window_size: PhysicalSize<u32>) -> Self {
        Self {
            state,
            gpu: None,
            egui_ctx: EguiContext::default(),
            window_size,
            focused: true,
        }
    }

    /// Run one frame: drain input, react to commands, draw.
    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let actions = self.state.update();

        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };

        for action in actions {
            match action {
                Action::ToggleFly => {
                    apply_cursor_mode(&gpu.window, self.state.controller.enabled());
                }
                Action::ToggleHud => self.state.show_hud = !self.state.show_hud,
                Action::Quit => {
                    tracing::info!("quit requested");
                    event_loop.exit();
                    return;
                }
                _ => {}
            }
        }

        // Input for this frame is fully applied; only now read the camera.
        let frame_view = self.state.frame_view();

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };
        let target = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        gpu.renderer.render(&gpu.device, &gpu.queue, &target, &frame_view);
        gpu.draw_overlay(&self.egui_ctx, &mut self.state, &target);

        output.present();
        gpu.window.request_redraw();
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }

        match Gpu::new(event_loop, self.window_size, &self.state.scene, &self.egui_ctx) {
            Ok(gpu) => {
                let size = gpu.window.inner_size();
                self.state.projection.resize(size.width, size.height);
                apply_cursor_mode(&gpu.window, self.state.controller.enabled());
                self.gpu = Some(gpu);
            }
            Err(e) => {
                tracing::error!("failed to initialize GPU: {e:#}");
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
        // egui only gets first pick while the cursor is free; in fly mode every
        // key belongs to the camera.
        if !self.state.controller.enabled() {
            if let Some(gpu) = &mut self.gpu {
                let response = gpu.egui_winit.on_window_event(&gpu.window, &event);
                if response.consumed {
                    return;
                }
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(new_size);
                    self.state
                        .projection
                        .resize(gpu.config.width, gpu.config.height);
                }
            }
            WindowEvent::Focused(focused) => {
                self.focused = focused;
                if !focused {
                    // Release events for held keys will not arrive while unfocused.
                    self.state.events.clear();
                    self.state.controller.release_all();
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                if let Some(key) = map_key(code) {
                    let event = match key_state {
                        ElementState::Pressed => InputEvent::KeyPressed { key },
                        ElementState::Released => InputEvent::KeyReleased { key },
                    };
                    self.state.events.push(event);
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * LINES_PER_PIXEL,
                };
                self.state.events.push(InputEvent::Scroll { delta: lines });
            }
            WindowEvent::MouseInput {
                button: MouseButton::Right,
                state: ElementState::Pressed,
                ..
            } => {
                let flying = !self.state.controller.enabled();
                self.state.controller.set_enabled(flying);
                if let Some(gpu) = &self.gpu {
                    apply_cursor_mode(&gpu.window, flying);
                }
            }
            WindowEvent::RedrawRequested => self.frame(event_loop),
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        // Raw motion keeps working while the cursor is locked, unlike CursorMoved.
        if let DeviceEvent::MouseMotion { delta } = event {
            if self.focused && self.state.controller.enabled() {
                self.state.events.push(InputEvent::MouseMotion {
                    dx: delta.0 as f32,
                    dy: delta.1 as f32,
                });
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gpu) = &self.gpu {
            gpu.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!(scene = %cli.scene, "flycam-desktop starting");

    let state = AppState::new(&cli)?;
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(state, PhysicalSize::new(cli.width, cli.height));
    event_loop.run_app(&mut app)?;

    Ok(())
}
