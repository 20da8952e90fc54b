//! End-to-end runs of both simulators through the driver and frame loop

use std::cell::RefCell;
use std::rc::Rc;

use physics_lab::consts::*;
use physics_lab::hud::ProjectileReadout;
use physics_lab::platform::{self, FrameScheduler, ManualScheduler, PageHide};
use physics_lab::renderer::{Scene, SceneStyle};
use physics_lab::sim::{
    Driver, EMITTER, ForceControls, ForceSim, LoopPhase, ProjectileControls, ProjectileSim,
    Trajectory,
};
use physics_lab::{QualityPreset, Settings};

/// Drive `driver` from a manual 60 Hz scheduler, counting redraws
fn mount<S: physics_lab::sim::Simulation + 'static>(
    scheduler: &Rc<ManualScheduler>,
    driver: &Rc<RefCell<Driver<S>>>,
) -> (platform::LoopHandle, Rc<RefCell<u32>>) {
    let draws = Rc::new(RefCell::new(0));
    let d = Rc::clone(driver);
    let n = Rc::clone(&draws);
    let shared: Rc<dyn FrameScheduler> = scheduler.clone();
    let handle = platform::start_loop(shared, move |_| {
        if d.borrow_mut().frame() {
            *n.borrow_mut() += 1;
        }
    });
    (handle, draws)
}

#[test]
fn force_sim_accelerates_while_running() {
    let scheduler = Rc::new(ManualScheduler::default());
    let driver = Rc::new(RefCell::new(Driver::new(ForceSim::default())));
    let (_handle, draws) = mount(&scheduler, &driver);

    driver.borrow_mut().play();
    assert_eq!(scheduler.pump_frames(30), 30);

    let d = driver.borrow();
    assert_eq!(d.ticks(), 30);
    assert_eq!(*draws.borrow(), 30);
    // a = 5 m/s², 30 frames of 1/60 s
    assert!((d.sim().body.vx - 2.5).abs() < 1e-9);
    assert!(d.sim().body.x > BODY_START_X);
}

#[test]
fn paused_force_sim_redraws_only_on_change() {
    let scheduler = Rc::new(ManualScheduler::default());
    let driver = Rc::new(RefCell::new(Driver::new(ForceSim::default())));
    let (_handle, draws) = mount(&scheduler, &driver);

    // Initial draw, then nothing
    scheduler.pump_frames(10);
    assert_eq!(*draws.borrow(), 1);
    assert_eq!(driver.borrow().ticks(), 0);

    driver.borrow_mut().edit(|s| s.controls.set_force(80.0));
    scheduler.pump_frames(10);
    assert_eq!(*draws.borrow(), 2);

    let d = driver.borrow();
    assert_eq!(d.sim().body.x, BODY_START_X);
    assert_eq!(d.sim().controls.force(), 80.0);
}

#[test]
fn body_stays_on_track_for_any_long_run() {
    let mut controls = ForceControls::default();
    controls.set_force(100.0);
    controls.set_mass(1.0);
    let mut driver = Driver::new(ForceSim::new(controls));
    driver.play();

    let mut bounced = false;
    for _ in 0..5_000 {
        driver.frame();
        let body = driver.sim().body;
        assert!(body.x >= BODY_RADIUS && body.x <= TRACK_WIDTH - BODY_RADIUS);
        bounced |= body.vx < 0.0;
    }
    assert!(bounced);
}

#[test]
fn force_reset_stops_and_rewinds() {
    let scheduler = Rc::new(ManualScheduler::default());
    let driver = Rc::new(RefCell::new(Driver::new(ForceSim::default())));
    let (_handle, _draws) = mount(&scheduler, &driver);

    driver.borrow_mut().play();
    scheduler.pump_frames(45);
    driver.borrow_mut().reset();
    scheduler.pump_frames(5);

    let d = driver.borrow();
    assert_eq!(d.phase(), LoopPhase::Idle);
    assert_eq!(d.ticks(), 0);
    assert_eq!(d.sim().body.x, BODY_START_X);
    assert_eq!(d.sim().body.vx, 0.0);
    assert_eq!(d.sim().controls, ForceControls::default());
}

#[test]
fn default_launch_lands_beyond_theoretical_range() {
    let mut driver = Driver::new(ProjectileSim::default());
    let id = driver.edit(|s| s.launch());
    assert_eq!(id, 1);
    driver.play();

    let mut frames = 0;
    while driver.sim().field.active_count() > 0 {
        driver.frame();
        frames += 1;
        assert!(frames < 1_000, "projectile never landed");
    }

    // The emitter sits above the field's lower edge, so the projectile
    // travels past the level-ground range before it leaves the field.
    let range_px = Trajectory::new(20.0, 45.0, 9.8).range.unwrap() * PIXELS_PER_METER;
    let p = &driver.sim().field.projectiles[0];
    assert!(!p.active);
    assert!(p.pos.x > EMITTER.x + range_px);
    assert!(p.pos.y >= FIELD_HEIGHT);
    assert!(p.trail.len() <= TRAIL_CAPACITY);
}

#[test]
fn drag_shortens_flight() {
    let land_x = |drag: f64| {
        let mut controls = ProjectileControls::default();
        controls.set_drag(drag);
        let mut sim = ProjectileSim::new(controls);
        sim.launch();
        let mut driver = Driver::new(sim);
        driver.play();
        while driver.sim().field.active_count() > 0 {
            driver.frame();
        }
        driver.sim().field.projectiles[0].pos.x
    };
    assert!(land_x(60.0) < land_x(0.0));
}

#[test]
fn projectile_reset_restarts_identities() {
    let scheduler = Rc::new(ManualScheduler::default());
    let driver = Rc::new(RefCell::new(Driver::new(ProjectileSim::default())));
    let (_handle, _draws) = mount(&scheduler, &driver);

    driver.borrow_mut().play();
    for _ in 0..3 {
        driver.borrow_mut().edit(|s| s.launch());
        scheduler.pump_frames(10);
    }
    assert_eq!(driver.borrow().sim().field.active_count(), 3);

    driver.borrow_mut().reset();
    assert!(driver.borrow().sim().field.is_empty());
    let ids: Vec<u32> = (0..5)
        .map(|_| driver.borrow_mut().edit(|s| s.launch()))
        .collect();
    assert_eq!(ids, [1, 2, 3, 4, 5]);
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn launch_while_paused_waits_for_play() {
    let mut driver = Driver::new(ProjectileSim::default());
    driver.edit(|s| s.launch());
    assert!(driver.frame());
    assert!(!driver.frame());

    let p = &driver.sim().field.projectiles[0];
    assert_eq!(p.pos, EMITTER);
    assert_eq!(p.time, 0.0);

    let readout = ProjectileReadout::new(driver.sim());
    assert_eq!(readout.in_flight, "In flight: 1");
}

#[test]
fn unmount_stops_both_loops() {
    let scheduler = Rc::new(ManualScheduler::default());
    let force = Rc::new(RefCell::new(Driver::new(ForceSim::default())));
    let projectile = Rc::new(RefCell::new(Driver::new(ProjectileSim::default())));
    let (force_loop, _) = mount(&scheduler, &force);
    let (projectile_loop, _) = mount(&scheduler, &projectile);

    force.borrow_mut().play();
    projectile.borrow_mut().play();
    scheduler.pump_frames(20);
    assert_eq!(scheduler.pending(), 2);

    force_loop.cancel();
    projectile_loop.cancel();
    assert_eq!(scheduler.pending(), 0);
    assert!(!scheduler.pump());
    assert_eq!(force.borrow().ticks(), 20);
    assert_eq!(projectile.borrow().ticks(), 20);
}

#[test]
fn cached_page_resumes_where_it_left_off() {
    let scheduler = Rc::new(ManualScheduler::default());
    let driver = Rc::new(RefCell::new(Driver::new(ProjectileSim::default())));
    let (handle, _draws) = mount(&scheduler, &driver);

    driver.borrow_mut().play();
    driver.borrow_mut().edit(|s| s.launch());
    scheduler.pump_frames(10);

    // Back/forward cache: nothing is torn down
    assert!(!handle.page_hidden(PageHide::Cached));
    scheduler.pump_frames(10);
    assert_eq!(driver.borrow().ticks(), 20);

    // Controls still reach a live loop after returning
    driver.borrow_mut().edit(|s| s.launch());
    scheduler.pump_frames(1);
    assert_eq!(driver.borrow().sim().field.active_count(), 2);

    assert!(handle.page_hidden(PageHide::Unloaded));
    assert!(!scheduler.pump());
    assert_eq!(driver.borrow().ticks(), 21);
}

#[test]
fn settings_feed_simulators_and_scenes() {
    let settings = Settings::from_json(
        r#"{
            "quality": "High",
            "projectile": { "angle_deg": 30.0, "speed": 15.0, "show_grid": false }
        }"#,
    )
    .unwrap();
    assert_eq!(settings.quality, QualityPreset::High);

    let sim = ProjectileSim::new(settings.projectile);
    assert_eq!(sim.controls.angle_deg(), 30.0);
    assert_eq!(sim.controls.gravity(), 9.8);

    let low = sim.build_vertices(&SceneStyle::from(QualityPreset::Low));
    let high = sim.build_vertices(&SceneStyle::from(settings.quality));
    assert!(high.len() > low.len());
}
