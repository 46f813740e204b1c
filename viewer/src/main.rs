//! Divided-globe viewer binary.
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::dbg_macro, clippy::large_enum_variant)]

mod globe;
mod grid_lines;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use egui_wgpu::Renderer as EguiRenderer;
use egui_wgpu::ScreenDescriptor;
use egui_winit::State as EguiWinitState;
use winit::{
    dpi::PhysicalSize,
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::{Window, WindowBuilder},
};

use engine::camera::{OrthoBounds, FRUSTUM_SIZE};
use engine::grid::FileGridSource;
use engine::manager::GridManager;
use engine::orientation::OrientationLock;
use engine::subdivision::Subdivision;
use engine::view::{Command, Effect, ViewState};

#[derive(Parser)]
#[command(about = "Interactive globe with a geodesic subdivision grid overlay")]
struct Args {
    /// Directory holding the sub{level}coords.json datasets.
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,
    /// Equirectangular earth texture image.
    #[arg(long, default_value = "assets/earth_daymap.jpg")]
    texture: PathBuf,
}

struct GpuState<'w> {
    _instance: wgpu::Instance,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
}
impl<'w> GpuState<'w> {
    async fn new(window: &'w Window) -> Self {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = match instance.create_surface(window) {
            Ok(s) => s,
            Err(e) => panic!("create surface: {e}"),
        };

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .unwrap_or_else(|| panic!("no suitable GPU adapters"));

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await
            .unwrap_or_else(|e| panic!("request device: {e}"));

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        Self { _instance: instance, surface, device, queue, config }
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    fn aspect(&self) -> f32 {
        self.config.width.max(1) as f32 / self.config.height.max(1) as f32
    }
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth"),
        size: wgpu::Extent3d { width: width.max(1), height: height.max(1), depth_or_array_layers: 1 },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Depth32Float,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

/// Decode the earth texture; a missing or broken file degrades to a single
/// white pixel so the globe still renders (flat-looking, logged).
fn load_texture_rgba(path: &Path) -> (Vec<u8>, (u32, u32)) {
    match image::open(path) {
        Ok(img) => {
            let rgba = img.to_rgba8();
            let (w, h) = rgba.dimensions();
            log::info!("[texture] {} ({w}x{h})", path.display());
            (rgba.into_raw(), (w, h))
        }
        Err(e) => {
            log::warn!("[texture] {}: {e}; rendering untextured", path.display());
            (vec![0xff; 4], (1, 1))
        }
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let event_loop = EventLoop::new().unwrap_or_else(|e| panic!("event loop: {e}"));
    let title = format!("Divided Globe v{}", engine::version());
    let window_init = WindowBuilder::new()
        .with_title(title)
        .build(&event_loop)
        .unwrap_or_else(|e| panic!("create window: {e}"));

    // Leak the window to obtain a 'static reference for the surface lifetime without unsafe.
    let window: &'static Window = Box::leak(Box::new(window_init));
    let mut gpu = pollster::block_on(GpuState::new(window));
    let egui_ctx = egui::Context::default();
    let mut egui_state =
        EguiWinitState::new(egui_ctx.clone(), egui::ViewportId::ROOT, &event_loop, None, None);
    let surface_format = gpu.config.format;
    let mut egui_renderer = EguiRenderer::new(&gpu.device, surface_format, None, 1);

    let mesh = globe::build_sphere_mesh(&gpu.device, 64, 64);
    let (texture_rgba, texture_size) = load_texture_rgba(&args.texture);
    let globe_renderer =
        globe::GlobeRenderer::new(&gpu.device, &gpu.queue, surface_format, &texture_rgba, texture_size);
    let mut grid_renderer = grid_lines::GridRenderer::new(&gpu.device, surface_format);
    let mut depth_view = create_depth_view(&gpu.device, gpu.config.width, gpu.config.height);

    let mut state = ViewState::default();
    let mut lock = OrientationLock::default();
    let mut cam = globe::OrbitCamera::default();
    let mut bounds = OrthoBounds::from_aspect(FRUSTUM_SIZE, gpu.aspect());
    let mut globe_rotation = glam::Quat::IDENTITY;
    let mut globe_textured = state.texture;
    let mut info_text = engine::info::grid_info_text(state.subdivision);

    let source = Arc::new(FileGridSource::new(&args.data_dir));
    let mut manager = GridManager::new(source, state.subdivision);
    manager.reload(state.subdivision);

    event_loop
        .run(move |event, elwt| {
            match event {
                Event::AboutToWait => {
                    window.request_redraw();
                }
                Event::WindowEvent { event, window_id } if window_id == window.id() => {
                    // forward events to egui (note: window, not context)
                    let _ = egui_state.on_window_event(window, &event);
                    match event {
                        WindowEvent::CloseRequested => elwt.exit(),
                        WindowEvent::Resized(size) => {
                            gpu.resize(size);
                            depth_view =
                                create_depth_view(&gpu.device, gpu.config.width, gpu.config.height);
                            bounds = OrthoBounds::from_aspect(FRUSTUM_SIZE, gpu.aspect());
                        }
                        WindowEvent::RedrawRequested => {
                            // Integrate any finished grid reload before drawing.
                            if manager.poll(state.wireframe) {
                                grid_renderer.upload(&gpu.device, manager.faces());
                            }

                            let mut commands: Vec<Command> = Vec::new();
                            let raw_input = egui_state.take_egui_input(window);
                            let full_output = egui_ctx.run(raw_input, |ctx| {
                                egui::Window::new("controls")
                                    .anchor(egui::Align2::RIGHT_TOP, [-8.0, 8.0])
                                    .resizable(false)
                                    .show(ctx, |ui| {
                                        let mut texture_flag = state.texture;
                                        if ui.checkbox(&mut texture_flag, "texture").changed() {
                                            commands.push(Command::SetTexture(texture_flag));
                                        }
                                        let mut wireframe_flag = state.wireframe;
                                        if ui.checkbox(&mut wireframe_flag, "wireframe").changed() {
                                            commands.push(Command::SetWireframe(wireframe_flag));
                                        }
                                        let mut fixed_flag = state.fixed;
                                        if ui.checkbox(&mut fixed_flag, "fixed").changed() {
                                            commands.push(Command::SetFixed(fixed_flag));
                                        }
                                        egui::ComboBox::from_label("subdivision")
                                            .selected_text(state.subdivision.to_string())
                                            .show_ui(ui, |ui| {
                                                for level in Subdivision::ALL {
                                                    let selected = state.subdivision == level;
                                                    if ui
                                                        .selectable_label(selected, level.to_string())
                                                        .clicked()
                                                        && !selected
                                                    {
                                                        commands
                                                            .push(Command::SetSubdivision(level));
                                                    }
                                                }
                                            });
                                        ui.separator();
                                        ui.label(info_text.as_str());
                                    });
                            });

                            for command in commands {
                                match state.apply(command) {
                                    Effect::SwapMaterial(textured) => globe_textured = textured,
                                    Effect::SetGridVisible(flag) => manager.set_visible(flag),
                                    Effect::CaptureOrientation => lock.engage(cam.rotation()),
                                    Effect::ReleaseOrientation => lock.release(),
                                    Effect::ReloadGrid(level) => {
                                        manager.reload(level);
                                        info_text = engine::info::grid_info_text(level);
                                    }
                                    Effect::None => {}
                                }
                            }

                            cam.update_from_input(&egui_ctx, egui_ctx.wants_pointer_input());
                            cam.tick();
                            if let Some(q) = lock.globe_rotation(cam.rotation()) {
                                globe_rotation = q;
                            }

                            let view_proj =
                                bounds.projection(0.1, 100.0, cam.zoom) * cam.view();
                            let model = glam::Mat4::from_quat(globe_rotation);
                            globe_renderer.update_uniforms(
                                &gpu.queue,
                                view_proj.to_cols_array_2d(),
                                model.to_cols_array_2d(),
                                state.subdivision.sphere_radius(),
                                globe_textured,
                            );
                            grid_renderer.update_uniforms(&gpu.queue, view_proj.to_cols_array_2d());

                            for (id, image_delta) in &full_output.textures_delta.set {
                                egui_renderer.update_texture(
                                    &gpu.device,
                                    &gpu.queue,
                                    *id,
                                    image_delta,
                                );
                            }
                            for id in &full_output.textures_delta.free {
                                egui_renderer.free_texture(id);
                            }
                            let ppp = window.scale_factor() as f32;
                            let paint_jobs = egui_ctx.tessellate(full_output.shapes, ppp);

                            let frame = match gpu.surface.get_current_texture() {
                                Ok(f) => f,
                                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                                    gpu.resize(window.inner_size());
                                    depth_view = create_depth_view(
                                        &gpu.device,
                                        gpu.config.width,
                                        gpu.config.height,
                                    );
                                    return;
                                }
                                Err(wgpu::SurfaceError::OutOfMemory) => {
                                    elwt.exit();
                                    return;
                                }
                                Err(wgpu::SurfaceError::Timeout) => {
                                    return;
                                }
                            };
                            let view =
                                frame.texture.create_view(&wgpu::TextureViewDescriptor::default());
                            let mut encoder = gpu.device.create_command_encoder(
                                &wgpu::CommandEncoderDescriptor { label: Some("encoder") },
                            );

                            {
                                let mut rpass =
                                    encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                                        label: Some("scene pass"),
                                        color_attachments: &[Some(
                                            wgpu::RenderPassColorAttachment {
                                                view: &view,
                                                resolve_target: None,
                                                ops: wgpu::Operations {
                                                    load: wgpu::LoadOp::Clear(wgpu::Color {
                                                        r: 0.006,
                                                        g: 0.006,
                                                        b: 0.006,
                                                        a: 1.0,
                                                    }),
                                                    store: wgpu::StoreOp::Store,
                                                },
                                            },
                                        )],
                                        depth_stencil_attachment: Some(
                                            wgpu::RenderPassDepthStencilAttachment {
                                                view: &depth_view,
                                                depth_ops: Some(wgpu::Operations {
                                                    load: wgpu::LoadOp::Clear(1.0),
                                                    store: wgpu::StoreOp::Discard,
                                                }),
                                                stencil_ops: None,
                                            },
                                        ),
                                        occlusion_query_set: None,
                                        timestamp_writes: None,
                                    });
                                globe_renderer.draw(&mut rpass, &mesh);
                                if manager.grid_visible() {
                                    grid_renderer.draw(&mut rpass);
                                }
                            }

                            let screen_desc = ScreenDescriptor {
                                size_in_pixels: [gpu.config.width, gpu.config.height],
                                pixels_per_point: ppp,
                            };
                            egui_renderer.update_buffers(
                                &gpu.device,
                                &gpu.queue,
                                &mut encoder,
                                &paint_jobs,
                                &screen_desc,
                            );

                            {
                                let mut rpass =
                                    encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                                        label: Some("egui pass"),
                                        color_attachments: &[Some(
                                            wgpu::RenderPassColorAttachment {
                                                view: &view,
                                                resolve_target: None,
                                                ops: wgpu::Operations {
                                                    load: wgpu::LoadOp::Load,
                                                    store: wgpu::StoreOp::Store,
                                                },
                                            },
                                        )],
                                        depth_stencil_attachment: None,
                                        occlusion_query_set: None,
                                        timestamp_writes: None,
                                    });
                                egui_renderer.render(&mut rpass, &paint_jobs, &screen_desc);
                            }
                            gpu.queue.submit(std::iter::once(encoder.finish()));
                            frame.present();

                            egui_state.handle_platform_output(window, full_output.platform_output);
                        }
                        _ => {}
                    }
                }
                _ => {}
            }
        })
        .unwrap_or_else(|e| panic!("run app: {e}"));
}
