//! Terminal-based ASCII viewer driving the frame3d math core

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use frame3d_core::{AffineFrame, Camera, Mesh, ProjectionMode};
use nalgebra::{Point3, Vector3};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod config;
pub mod renderer;

pub use config::ViewerConfig;
pub use renderer::AsciiRenderer;

/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f32 = 0.5;

/// Rotation applied per key press, in radians
const KEY_ROTATION: f32 = 0.1;

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    mesh: Mesh,
    model: AffineFrame<f32>,
    camera: Camera<f32>,
    renderer: AsciiRenderer,
    config: ViewerConfig,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(mesh: Mesh, config: ViewerConfig) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self::with_size(mesh, config, width, height))
    }

    /// Build the app for a fixed screen size without touching the terminal
    pub fn with_size(mesh: Mesh, config: ViewerConfig, width: u16, height: u16) -> Self {
        let mut camera = Camera::new(width as u32, height as u32);
        camera.aspect *= CELL_ASPECT;
        camera.fov = config.fov_degrees.to_radians();
        camera.position = Point3::new(0.0, 0.0, config.distance);
        camera.mode = config.projection.into();

        Self {
            mesh,
            model: Self::initial_model(),
            camera,
            renderer: AsciiRenderer::new(width as usize, height as usize),
            config,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        }
    }

    fn initial_model() -> AffineFrame<f32> {
        let mut model = AffineFrame::new();
        model.rotate(0.3, &Vector3::x()).rotate(0.3, &Vector3::y());
        model
    }

    pub fn model(&self) -> &AffineFrame<f32> {
        &self.model
    }

    pub fn camera(&self) -> &Camera<f32> {
        &self.camera
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / u64::from(self.config.fps.max(1)));

        while self.running {
            let frame_start = Instant::now();

            if event::poll(Duration::from_millis(0))? {
                if let Event::Key(KeyEvent { code, .. }) = event::read()? {
                    self.handle_key(code);
                }
            }

            self.update();
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    /// Apply a key press: rotations are about the cube's own axes,
    /// movement is along the world axes.
    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
            }
            KeyCode::Char('w') | KeyCode::Up => {
                self.model.rotate(KEY_ROTATION, &Vector3::x());
            }
            KeyCode::Char('s') | KeyCode::Down => {
                self.model.rotate(-KEY_ROTATION, &Vector3::x());
            }
            KeyCode::Char('a') | KeyCode::Left => {
                self.model.rotate(-KEY_ROTATION, &Vector3::y());
            }
            KeyCode::Char('d') | KeyCode::Right => {
                self.model.rotate(KEY_ROTATION, &Vector3::y());
            }
            KeyCode::Char('e') => {
                self.model.rotate(KEY_ROTATION, &Vector3::z());
            }
            KeyCode::Char('c') => {
                self.model.rotate(-KEY_ROTATION, &Vector3::z());
            }
            KeyCode::Char('z') => {
                self.model.translate_absolute(&Vector3::new(0.0, 0.0, 0.25));
            }
            KeyCode::Char('x') => {
                self.model.translate_absolute(&Vector3::new(0.0, 0.0, -0.25));
            }
            KeyCode::Char('p') => {
                self.camera.mode = self.camera.mode.toggled();
                log::info!("switched to {:?} projection", self.camera.mode);
            }
            KeyCode::Char('r') => {
                self.model = Self::initial_model();
            }
            _ => {}
        }
    }

    /// Continuous slow rotation about the cube's own x, y and z axes
    pub fn update(&mut self) {
        let spin = self.config.spin_degrees.to_radians();
        self.model
            .rotate(spin, &Vector3::x())
            .rotate(spin * 1.5, &Vector3::y())
            .rotate(spin * 0.5, &Vector3::z());
    }

    fn render(&mut self) -> io::Result<()> {
        self.renderer.clear();
        self.renderer.render_mesh(&self.mesh, &self.model, &self.camera);

        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.renderer.draw(&mut stdout)?;

        let mode = match self.camera.mode {
            ProjectionMode::Perspective => "perspective",
            ProjectionMode::Orthographic => "orthographic",
        };
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "frame3d | FPS: {:.1} | {} | WASD/Arrows=Rotate E/C=Roll Z/X=Move P=Projection R=Reset Q=Quit",
                self.fps, mode
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
