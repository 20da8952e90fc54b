//! Physics Lab entry point
//!
//! On the web, mounts both simulators onto their canvases and drives them
//! from `requestAnimationFrame`. Natively, runs them headless for a few
//! seconds of simulated frames and logs the outcome.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_lab {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlInputElement, PageTransitionEvent};

    use physics_lab::Settings;
    use physics_lab::hud::{ForceReadout, ProjectileReadout};
    use physics_lab::platform::web::AnimationFrames;
    use physics_lab::platform::{self, FrameScheduler, LoopHandle, PageHide};
    use physics_lab::renderer::{RenderState, Scene, SceneStyle};
    use physics_lab::sim::{Driver, ForceSim, ProjectileSim, Simulation};

    /// Writes a simulator's textual readouts into the page
    trait Readout {
        fn write_readout(&self, document: &Document, prefix: &str);
    }

    impl Readout for ForceSim {
        fn write_readout(&self, document: &Document, prefix: &str) {
            let r = ForceReadout::new(self);
            set_text(document, &format!("{prefix}-force-label"), &r.force);
            set_text(document, &format!("{prefix}-mass-label"), &r.mass);
            set_text(document, &format!("{prefix}-law"), &r.law);
        }
    }

    impl Readout for ProjectileSim {
        fn write_readout(&self, document: &Document, prefix: &str) {
            let r = ProjectileReadout::new(self);
            set_text(document, &format!("{prefix}-angle-label"), &r.angle);
            set_text(document, &format!("{prefix}-velocity-label"), &r.speed);
            set_text(document, &format!("{prefix}-mass-label"), &r.mass);
            set_text(document, &format!("{prefix}-gravity-label"), &r.gravity);
            set_text(document, &format!("{prefix}-drag-label"), &r.drag);
            set_text(document, &format!("{prefix}-range"), &r.range);
            set_text(document, &format!("{prefix}-height"), &r.max_height);
            set_text(document, &format!("{prefix}-time"), &r.flight_time);
            set_text(document, &format!("{prefix}-in-flight"), &r.in_flight);
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    /// One mounted simulator
    struct Lab<S> {
        driver: Driver<S>,
        /// None until the GPU surface is ready (or if it failed)
        render_state: Option<RenderState>,
        style: SceneStyle,
        document: Document,
        prefix: &'static str,
    }

    impl<S: Simulation + Scene + Readout> Lab<S> {
        /// Integrate (if running) and redraw (if anything changed)
        fn frame(&mut self) {
            if !self.driver.frame() {
                return;
            }
            self.render();
            self.driver
                .sim()
                .write_readout(&self.document, self.prefix);
        }

        fn render(&mut self) {
            // No surface yet: skip the frame
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            let vertices = self.driver.sim().build_vertices(&self.style);
            match render_state.render(&vertices) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    render_state.resize(render_state.size.0, render_state.size.1);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }
    }

    /// A simulator with its running loop
    struct Mounted<S> {
        lab: Rc<RefCell<Lab<S>>>,
        frames: LoopHandle,
    }

    impl<S> Mounted<S> {
        /// Release the surface only once the loop drawing to it has stopped
        fn page_hidden(&self, hide: PageHide) {
            if self.frames.page_hidden(hide) {
                self.lab.borrow_mut().render_state = None;
            }
        }
    }

    async fn create_render_state(
        instance: &wgpu::Instance,
        canvas: &HtmlCanvasElement,
        canvas_size: glam::Vec2,
    ) -> Option<RenderState> {
        let window = web_sys::window()?;
        let dpr = window.device_pixel_ratio();
        let client_w = match canvas.client_width() {
            w if w > 0 => w as f64,
            _ => canvas_size.x as f64,
        };
        let client_h = match canvas.client_height() {
            h if h > 0 => h as f64,
            _ => canvas_size.y as f64,
        };
        let width = (client_w * dpr) as u32;
        let height = (client_h * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {}", e);
                return None;
            }
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::error!("Failed to get adapter: {}", e);
                return None;
            }
        };
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, width, height, canvas_size).await {
            Ok(render_state) => Some(render_state),
            Err(e) => {
                log::error!("Render setup failed: {}", e);
                None
            }
        }
    }

    /// Mount `sim` onto the canvas `{prefix}-canvas`, if the page has one
    async fn mount<S>(
        document: &Document,
        instance: &wgpu::Instance,
        scheduler: &Rc<dyn FrameScheduler>,
        prefix: &'static str,
        sim: S,
        style: SceneStyle,
    ) -> Option<Mounted<S>>
    where
        S: Simulation + Scene + Readout + 'static,
    {
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(&format!("{prefix}-canvas"))?
            .dyn_into()
            .ok()?;

        let render_state = create_render_state(instance, &canvas, sim.canvas_size()).await;
        let lab = Rc::new(RefCell::new(Lab {
            driver: Driver::new(sim),
            render_state,
            style,
            document: document.clone(),
            prefix,
        }));

        let frame_lab = Rc::clone(&lab);
        let frames = platform::start_loop(Rc::clone(scheduler), move |_time| {
            frame_lab.borrow_mut().frame();
        });

        log::info!("Mounted {} simulator", prefix);
        Some(Mounted { lab, frames })
    }

    fn on_click(document: &Document, id: &str, mut f: impl FnMut() + 'static) {
        if let Some(el) = document.get_element_by_id(id) {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| f());
            let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn input(document: &Document, id: &str) -> Option<HtmlInputElement> {
        document.get_element_by_id(id)?.dyn_into().ok()
    }

    /// Range slider: seed with `initial`, report every change
    fn on_slider(document: &Document, id: &str, initial: f64, mut f: impl FnMut(f64) + 'static) {
        let Some(el) = input(document, id) else {
            return;
        };
        el.set_value_as_number(initial);
        let source = el.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            f(source.value_as_number());
        });
        let _ = el.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Checkbox: seed with `initial`, report every toggle
    fn on_checkbox(document: &Document, id: &str, initial: bool, mut f: impl FnMut(bool) + 'static) {
        let Some(el) = input(document, id) else {
            return;
        };
        el.set_checked(initial);
        let source = el.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            f(source.checked());
        });
        let _ = el.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_force_controls(document: &Document, lab: &Rc<RefCell<Lab<ForceSim>>>) {
        let controls = lab.borrow().driver.sim().controls;

        let l = Rc::clone(lab);
        on_click(document, "force-play", move || l.borrow_mut().driver.toggle());
        let l = Rc::clone(lab);
        on_click(document, "force-reset", move || l.borrow_mut().driver.reset());

        let l = Rc::clone(lab);
        on_slider(document, "force-force", controls.force(), move |v| {
            l.borrow_mut().driver.edit(|s| s.controls.set_force(v));
        });
        let l = Rc::clone(lab);
        on_slider(document, "force-mass", controls.mass().get(), move |v| {
            l.borrow_mut().driver.edit(|s| s.controls.set_mass(v));
        });
    }

    fn setup_projectile_controls(document: &Document, lab: &Rc<RefCell<Lab<ProjectileSim>>>) {
        let controls = lab.borrow().driver.sim().controls;

        let l = Rc::clone(lab);
        on_click(document, "projectile-play", move || l.borrow_mut().driver.toggle());
        let l = Rc::clone(lab);
        on_click(document, "projectile-reset", move || l.borrow_mut().driver.reset());
        let l = Rc::clone(lab);
        on_click(document, "projectile-fire", move || {
            l.borrow_mut().driver.edit(|s| s.launch());
        });

        let l = Rc::clone(lab);
        on_slider(document, "projectile-angle", controls.angle_deg(), move |v| {
            l.borrow_mut().driver.edit(|s| s.controls.set_angle(v));
        });
        let l = Rc::clone(lab);
        on_slider(document, "projectile-velocity", controls.speed(), move |v| {
            l.borrow_mut().driver.edit(|s| s.controls.set_speed(v));
        });
        let l = Rc::clone(lab);
        on_slider(document, "projectile-mass", controls.mass().get(), move |v| {
            l.borrow_mut().driver.edit(|s| s.controls.set_mass(v));
        });
        let l = Rc::clone(lab);
        on_slider(document, "projectile-gravity", controls.gravity(), move |v| {
            l.borrow_mut().driver.edit(|s| s.controls.set_gravity(v));
        });
        let l = Rc::clone(lab);
        on_slider(document, "projectile-drag", controls.drag(), move |v| {
            l.borrow_mut().driver.edit(|s| s.controls.set_drag(v));
        });

        let l = Rc::clone(lab);
        on_checkbox(document, "projectile-trajectory", controls.show_trajectory, move |on| {
            l.borrow_mut().driver.edit(|s| s.controls.show_trajectory = on);
        });
        let l = Rc::clone(lab);
        on_checkbox(document, "projectile-vectors", controls.show_vectors, move |on| {
            l.borrow_mut().driver.edit(|s| s.controls.show_vectors = on);
        });
        let l = Rc::clone(lab);
        on_checkbox(document, "projectile-grid", controls.show_grid, move |on| {
            l.borrow_mut().driver.edit(|s| s.controls.show_grid = on);
        });
    }

    /// Save the controls whenever the page is hidden. Loops and surfaces
    /// are torn down only when the page is discarded; a page parked in the
    /// back/forward cache resumes its pending frames when shown again.
    fn setup_page_hide(
        force: Option<Mounted<ForceSim>>,
        projectile: Option<Mounted<ProjectileSim>>,
        settings: Settings,
    ) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: PageTransitionEvent| {
            let hide = PageHide::from_persisted(event.persisted());
            let mut settings = settings.clone();
            if let Some(m) = &force {
                settings.force = m.lab.borrow().driver.sim().controls;
                m.page_hidden(hide);
            }
            if let Some(m) = &projectile {
                settings.projectile = m.lab.borrow().driver.sim().controls;
                m.page_hidden(hide);
            }
            settings.save();
            match hide {
                PageHide::Cached => log::info!("Page cached; simulators suspended"),
                PageHide::Unloaded => log::info!("Simulators unmounted"),
            }
        });
        let _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Physics Lab starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document; nothing to mount");
            return;
        };
        let Some(frames) = AnimationFrames::new() else {
            log::error!("No window for animation frames");
            return;
        };
        let scheduler: Rc<dyn FrameScheduler> = Rc::new(frames);

        let settings = Settings::load();
        let style = SceneStyle::from(settings.quality);
        log::info!("Quality preset: {}", settings.quality.as_str());

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let force = mount(
            &document,
            &instance,
            &scheduler,
            "force",
            ForceSim::new(settings.force),
            style,
        )
        .await;
        if let Some(m) = &force {
            setup_force_controls(&document, &m.lab);
        }

        let projectile = mount(
            &document,
            &instance,
            &scheduler,
            "projectile",
            ProjectileSim::new(settings.projectile),
            style,
        )
        .await;
        if let Some(m) = &projectile {
            setup_projectile_controls(&document, &m.lab);
        }

        if force.is_none() && projectile.is_none() {
            log::warn!("No simulator canvas found on this page");
        }

        setup_page_hide(force, projectile, settings);

        log::info!("Physics Lab running!");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_lab::run().await;
}

/// Simulated frames for the native headless run (five seconds at 60 Hz)
#[cfg(not(target_arch = "wasm32"))]
const HEADLESS_FRAMES: usize = 300;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Physics Lab (native) starting...");
    log::info!("Native mode runs the simulators headless - build for wasm32 to see them");

    let settings = physics_lab::Settings::load();
    run_headless(&settings, HEADLESS_FRAMES);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn run_headless(settings: &physics_lab::Settings, frames: usize) {
    use std::cell::RefCell;
    use std::rc::Rc;

    use physics_lab::hud::{ForceReadout, ProjectileReadout};
    use physics_lab::platform::{self, FrameScheduler, ManualScheduler};
    use physics_lab::renderer::{Scene, SceneStyle};
    use physics_lab::sim::{Driver, ForceSim, ProjectileSim};

    /// Frames between automatic launches
    const LAUNCH_EVERY: u32 = 45;
    const LAUNCHES: u32 = 4;

    let scheduler = Rc::new(ManualScheduler::default());
    let shared: Rc<dyn FrameScheduler> = scheduler.clone();
    let style = SceneStyle::from(settings.quality);

    let force = Rc::new(RefCell::new(Driver::new(ForceSim::new(settings.force))));
    let projectile = Rc::new(RefCell::new(Driver::new(ProjectileSim::new(
        settings.projectile,
    ))));

    let f = Rc::clone(&force);
    let force_loop = platform::start_loop(Rc::clone(&shared), move |_| {
        let mut driver = f.borrow_mut();
        if driver.frame() {
            let vertices = driver.sim().build_vertices(&style);
            log::trace!("force frame: {} vertices", vertices.len());
        }
    });

    let p = Rc::clone(&projectile);
    let mut frame_no = 0u32;
    let projectile_loop = platform::start_loop(shared, move |_| {
        let mut driver = p.borrow_mut();
        if frame_no % LAUNCH_EVERY == 0 && frame_no / LAUNCH_EVERY < LAUNCHES {
            let id = driver.edit(|s| s.launch());
            log::info!("Fired projectile {}", id);
        }
        frame_no += 1;
        if driver.frame() {
            let vertices = driver.sim().build_vertices(&style);
            log::trace!("projectile frame: {} vertices", vertices.len());
        }
    });

    force.borrow_mut().play();
    projectile.borrow_mut().play();
    let ran = scheduler.pump_frames(frames);

    force_loop.cancel();
    projectile_loop.cancel();

    let force = force.borrow();
    let body = force.sim().body;
    let readout = ForceReadout::new(force.sim());
    println!("\nForce/mass simulator after {} frames:", ran);
    println!("  {}", readout.law);
    println!("  x = {:.2} px, vx = {:.3}", body.x, body.vx);

    let projectile = projectile.borrow();
    let readout = ProjectileReadout::new(projectile.sim());
    println!("\nProjectile simulator after {} frames:", ran);
    println!("  angle {}  {}", readout.angle, readout.range);
    println!("  {}  {}", readout.max_height, readout.flight_time);
    for p in &projectile.sim().field.projectiles {
        println!(
            "  #{:<3} ({:7.2}, {:7.2}) t={:.2}s trail={} {}",
            p.id,
            p.pos.x,
            p.pos.y,
            p.time,
            p.trail.len(),
            if p.active { "in flight" } else { "landed" }
        );
    }
}
