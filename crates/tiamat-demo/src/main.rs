use anyhow::Result;
use glam::Vec3;
use winit::dpi::LogicalSize;

use tiamat_engine::coords::Rect;
use tiamat_engine::core::{App, AppControl, FrameCtx, WindowCtx};
use tiamat_engine::device::GpuInit;
use tiamat_engine::input::{ActionMap, GamepadAxis, GamepadButton, Key, MouseButton};
use tiamat_engine::logging::{init_logging, LoggingConfig};
use tiamat_engine::paint::Color;
use tiamat_engine::render::{Camera, Image2D, Renderer2D, RendererConfig, Texture2D, TextureSpec, WHITE_SLOT};
use tiamat_engine::scene::{Transform, TransformArena, TransformId};
use tiamat_engine::window::{Runtime, RuntimeConfig, WindowFlags};

const BACKGROUND: Color = Color::rgb(0.07, 0.08, 0.10);
const CHECKER_SLOT: u32 = 1;
const PAN_SPEED: f32 = 320.0;
const STICK_DEAD_ZONE: f32 = 0.2;

const GRID_STEP: f32 = 64.0;
const GRID_EXTENT: f32 = 2048.0;

// 40 x 30 tiles: more than one sprite batch at the default size.
const TILE_COLS: u32 = 40;
const TILE_ROWS: u32 = 30;
const TILE_SIZE: f32 = 20.0;

struct Demo {
    actions: ActionMap,
    scene: TransformArena,
    pivot: TransformId,
    satellite: TransformId,
    camera: Camera,
    checker: Texture2D,
    vsync: bool,
    spin: f32,
}

impl Demo {
    fn new() -> Self {
        let mut actions = ActionMap::new();
        actions.bind_key("pan_x", Key::D, 1.0);
        actions.bind_key("pan_x", Key::ArrowRight, 1.0);
        actions.bind_key("pan_x", Key::A, -1.0);
        actions.bind_key("pan_x", Key::ArrowLeft, -1.0);
        actions.bind_key("pan_y", Key::S, 1.0);
        actions.bind_key("pan_y", Key::ArrowDown, 1.0);
        actions.bind_key("pan_y", Key::W, -1.0);
        actions.bind_key("pan_y", Key::ArrowUp, -1.0);
        actions.bind_mouse_button("mark", MouseButton::Left, 1.0);
        actions.bind_key("toggle_vsync", Key::V, 1.0);
        actions.bind_key("quit", Key::Escape, 1.0);

        // First gamepad; stick up is positive while screen y grows down.
        actions.bind_gamepad_axis("pan_x", GamepadAxis::LeftStickX, 0, STICK_DEAD_ZONE, 1.0);
        actions.bind_gamepad_axis("pan_y", GamepadAxis::LeftStickY, 0, STICK_DEAD_ZONE, -1.0);
        actions.bind_gamepad_button("mark", GamepadButton::South, 0, 1.0);
        actions.bind_gamepad_button("toggle_vsync", GamepadButton::North, 0, 1.0);
        actions.bind_gamepad_button("quit", GamepadButton::Start, 0, 1.0);

        let mut scene = TransformArena::new();
        let pivot = scene.insert(Transform::from_position(Vec3::new(640.0, 360.0, 0.0)));
        let satellite = scene.insert(Transform::from_position(Vec3::new(180.0, 0.0, 0.0)));
        scene.set_parent(satellite, Some(pivot));

        Self {
            actions,
            scene,
            pivot,
            satellite,
            camera: Camera::orthographic_2d(1280.0, 720.0),
            checker: Texture2D::NULL,
            vsync: true,
            spin: 0.0,
        }
    }

    fn queue_grid(renderer: &mut Renderer2D) {
        let color = Color::rgba(1.0, 1.0, 1.0, 0.08);
        let mut at = 0.0;
        while at <= GRID_EXTENT {
            renderer.add_line2d(at, 0.0, at, GRID_EXTENT, color);
            renderer.add_line2d(0.0, at, GRID_EXTENT, at, color);
            at += GRID_STEP;
        }
    }

    fn queue_tiles(&self, renderer: &mut Renderer2D) {
        let cold = Color::rgb(0.25, 0.55, 0.95);
        let warm = Color::rgb(0.95, 0.45, 0.25);
        let origin = (96.0, 96.0);

        for row in 0..TILE_ROWS {
            for col in 0..TILE_COLS {
                let t = (col + row) as f32 / (TILE_COLS + TILE_ROWS - 2) as f32;
                let pulse = 0.5 + 0.5 * (self.spin * 2.0 + t * 6.0).sin();
                let color = Color::mix(cold, warm, t).with_alpha(0.4 + 0.6 * pulse);

                // Checkerboard of textured and untextured tiles.
                let slot = if (row + col) % 2 == 0 { CHECKER_SLOT } else { WHITE_SLOT };
                let x = origin.0 + col as f32 * (TILE_SIZE + 4.0);
                let y = origin.1 + row as f32 * (TILE_SIZE + 4.0);
                renderer.add_sprite(x, y, TILE_SIZE, TILE_SIZE, color, slot, Rect::UNIT);
            }
        }
    }

    fn queue_orbit(&mut self, renderer: &mut Renderer2D) {
        if let Some(pivot) = self.scene.get_mut(self.pivot) {
            pivot.set_rotation(Vec3::Z, self.spin);
        }

        let Some(pivot) = self.scene.get(self.pivot) else { return };
        let Some(satellite) = self.scene.get(self.satellite) else { return };
        let center = self.scene.global_position(pivot);
        let orbiter = self.scene.global_position(satellite);

        renderer.add_line2d(center.x, center.y, orbiter.x, orbiter.y, Color::rgba(1.0, 1.0, 1.0, 0.5));
        renderer.add_box2d(center.x - 6.0, center.y - 6.0, 12.0, 12.0, Color::WHITE);

        // Sample the middle quarter of the checker, magnified.
        let uv = Rect::new(0.375, 0.375, 0.25, 0.25);
        renderer.add_sprite(orbiter.x - 24.0, orbiter.y - 24.0, 48.0, 48.0, Color::WHITE, CHECKER_SLOT, uv);
    }

    fn queue_cursor(&self, renderer: &mut Renderer2D, pointer: (f32, f32)) {
        let eye = self.camera.transform.position;
        let (x, y) = (pointer.0 + eye.x, pointer.1 + eye.y);

        let color = if self.actions.pressed("mark") {
            Color::rgb(1.0, 0.85, 0.2)
        } else {
            Color::rgba(1.0, 1.0, 1.0, 0.7)
        };

        renderer.add_line2d(x - 12.0, y, x + 12.0, y, color);
        renderer.add_line2d(x, y - 12.0, x, y + 12.0, color);
        if self.actions.pressed("mark") {
            renderer.add_box2d(x - 16.0, y - 16.0, 32.0, 32.0, color);
        }
    }
}

fn checker_image(size: u32, cell: u32) -> Image2D {
    let mut image = Image2D::blank(size, size, 4);
    for y in 0..size {
        for x in 0..size {
            let dark = (x / cell + y / cell) % 2 == 0;
            let rgba = if dark { [60, 60, 72, 255] } else { [230, 230, 240, 255] };
            image.put_pixel(x, y, rgba);
        }
    }
    image
}

impl App for Demo {
    fn on_init(&mut self, window: &WindowCtx<'_>, renderer: &mut Renderer2D) {
        self.camera.resize(window.viewport());

        self.checker = renderer.load_texture(&checker_image(64, 8), TextureSpec::default());
        if self.checker.is_null() {
            log::warn!("checker texture unavailable; textured tiles render white");
        }
        renderer.bind_texture_slot(self.checker, CHECKER_SLOT);
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        self.actions.update(ctx.input);

        if self.actions.just_pressed("quit") {
            return AppControl::Exit;
        }
        if self.actions.just_pressed("toggle_vsync") {
            self.vsync = !self.vsync;
            ctx.runtime.set_vsync(self.vsync);
            log::info!("vsync {}", if self.vsync { "on" } else { "off" });
        }

        let dt = ctx.time.dt;
        self.spin += dt;

        let pan = Vec3::new(self.actions.value("pan_x"), self.actions.value("pan_y"), 0.0);
        self.camera.transform.position += pan * PAN_SPEED * dt;
        self.camera.resize(ctx.renderer.viewport());
        self.camera.update_view(&self.scene);

        Self::queue_grid(ctx.renderer);
        self.queue_tiles(ctx.renderer);
        self.queue_orbit(ctx.renderer);
        if let Some((x, y)) = ctx.input.pointer_pos {
            let scale = ctx.window.scale_factor();
            self.queue_cursor(ctx.renderer, (x * scale, y * scale));
        }

        if ctx.time.frame_index % 120 == 0 {
            ctx.runtime.set_title(format!("tiamat demo | {:.0} fps", 1.0 / dt));
        }

        let camera = &self.camera;
        ctx.render(BACKGROUND, |frame| {
            let lines = frame.draw_lines(camera);
            let sprites = frame.draw_sprites(camera);
            log::trace!(
                "frame: {} lines in {} draws, {} sprites in {} draws",
                lines.primitives,
                lines.draws,
                sprites.primitives,
                sprites.draws
            );
        })
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        title: "tiamat demo".to_string(),
        initial_size: LogicalSize::new(1280.0, 720.0),
        flags: WindowFlags::default(),
    };

    Runtime::run(config, GpuInit::default(), RendererConfig::default(), Demo::new())
}
