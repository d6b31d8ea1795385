use tracing::debug;

use super::integrator::{pose_at, tick};
use super::state::{TickOutput, VehicleState};
use crate::sim::{Frame, FrameHint, PhysicsConfig, RideParams};
use crate::track::{default_layout, ControlPoint, Curve, CurveError, CurveKind};

/// Drives one cart along one curve.
///
/// Owns everything the integrator needs between ticks. The caller owns the
/// `Simulation` itself and decides when to call [`Simulation::step`].
#[derive(Debug, Clone)]
pub struct Simulation {
    curve: Curve,
    state: VehicleState,
    hint: Option<FrameHint>,
    output: TickOutput,
    params: RideParams,
    config: PhysicsConfig,
    running: bool,
}

impl Simulation {
    /// Builds a centripetal Catmull-Rom curve through `points` and places the
    /// cart at rest on its start.
    pub fn new(
        points: Vec<ControlPoint>,
        params: RideParams,
        config: PhysicsConfig,
    ) -> Result<Self, CurveError> {
        let curve = Curve::build(points, CurveKind::default(), config.arc_samples)?;
        Ok(Self::with_curve(curve, params, config))
    }

    pub fn with_curve(curve: Curve, params: RideParams, config: PhysicsConfig) -> Self {
        let (output, hint) = pose_at(&curve, 0.0, 0.0, None, &config);
        Self {
            curve,
            state: VehicleState::new(),
            hint: Some(hint),
            output,
            params,
            config,
            running: true,
        }
    }

    /// The built-in ride with default parameters and configuration.
    pub fn with_default_layout() -> Result<Self, CurveError> {
        Self::new(
            default_layout(),
            RideParams::default(),
            PhysicsConfig::default(),
        )
    }

    /// Advances by `dt` seconds and returns the latest output.
    ///
    /// Paused simulations and non-positive steps leave everything untouched.
    /// Steps longer than `max_dt` are shortened to it.
    pub fn step(&mut self, dt: f32) -> &TickOutput {
        if !self.running || dt.is_nan() || dt <= 0.0 {
            return &self.output;
        }

        let dt = if dt > self.config.max_dt {
            debug!(requested = dt, applied = self.config.max_dt, "capped time step");
            self.config.max_dt
        } else {
            dt
        };

        let (output, hint) = tick(
            &mut self.state,
            self.hint.as_ref(),
            &self.curve,
            &self.params,
            &self.config,
            dt,
        );
        self.output = output;
        self.hint = Some(hint);
        &self.output
    }

    /// Puts the cart back at rest on the start of the track.
    ///
    /// The frame is rebuilt from scratch; no continuity is carried over.
    pub fn reset(&mut self) {
        self.state.reset();
        let (output, hint) = pose_at(&self.curve, 0.0, 0.0, None, &self.config);
        self.output = output;
        self.hint = Some(hint);
    }

    /// Replaces the ride parameters, taking effect on the next step.
    pub fn set_params(&mut self, params: RideParams) {
        self.params = params;
    }

    pub fn params(&self) -> &RideParams {
        &self.params
    }

    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn state(&self) -> &VehicleState {
        &self.state
    }

    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    pub fn output(&self) -> &TickOutput {
        &self.output
    }

    pub fn frame(&self) -> &Frame {
        &self.output.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::build_frame;
    use crate::track::banking_at;
    use approx::assert_relative_eq;

    const TOLERANCE: f32 = 1e-5;
    const DT: f32 = 1.0 / 60.0;

    fn default_sim() -> Simulation {
        Simulation::with_default_layout().unwrap()
    }

    fn start_frame(sim: &Simulation) -> Frame {
        let curve = sim.curve();
        let (frame, _) = build_frame(
            curve.tangent_at(0.0),
            banking_at(0.0, curve.control_points()),
            None,
            sim.config().straight_threshold,
        );
        frame
    }

    #[test]
    fn starts_at_rest_on_first_point() {
        let sim = default_sim();
        let first = sim.curve().control_points()[0].position();

        assert!(sim.is_running());
        assert_eq!(*sim.state(), VehicleState::new());
        assert_relative_eq!(sim.output().position.x, first.x, epsilon = TOLERANCE);
        assert_relative_eq!(sim.output().position.y, first.y, epsilon = TOLERANCE);
        assert_relative_eq!(sim.output().position.z, first.z, epsilon = TOLERANCE);
        assert_eq!(*sim.frame(), start_frame(&sim));
    }

    #[test]
    fn reset_returns_to_start() {
        let mut sim = default_sim();
        for _ in 0..120 {
            sim.step(DT);
        }
        assert!(sim.state().distance > 0.0);

        sim.reset();
        let state = sim.state();
        assert_eq!(state.distance, 0.0);
        assert_eq!(state.velocity, 0.0);
        assert_eq!(state.acceleration, 0.0);
        assert_eq!(*sim.frame(), start_frame(&sim));
        assert_eq!(sim.output().u, 0.0);
    }

    #[test]
    fn reset_then_replay_is_identical() {
        let mut sim = default_sim();
        let first: Vec<_> = (0..90).map(|_| *sim.step(DT)).collect();
        sim.reset();
        let second: Vec<_> = (0..90).map(|_| *sim.step(DT)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn paused_step_changes_nothing() {
        let mut sim = default_sim();
        sim.step(DT);
        sim.set_running(false);
        assert!(!sim.is_running());

        let state = *sim.state();
        let output = *sim.output();
        for _ in 0..10 {
            sim.step(DT);
        }
        assert_eq!(*sim.state(), state);
        assert_eq!(*sim.output(), output);

        sim.set_running(true);
        sim.step(DT);
        assert_ne!(*sim.state(), state);
    }

    #[test]
    fn non_positive_steps_are_ignored() {
        let mut sim = default_sim();
        let state = *sim.state();
        sim.step(0.0);
        sim.step(-1.0);
        sim.step(f32::NAN);
        assert_eq!(*sim.state(), state);
    }

    #[test]
    fn long_steps_are_capped() {
        let mut capped = default_sim();
        let mut reference = default_sim();
        capped.step(5.0);
        reference.step(reference.config().max_dt);
        assert_eq!(capped.state(), reference.state());
    }

    #[test]
    fn set_params_applies_on_next_step() {
        let mut heavy = default_sim();
        let mut sticky = default_sim();
        sticky.set_params(RideParams::default().with_friction(0.1));
        heavy.set_params(RideParams::default().with_mass(1000.0));
        assert_eq!(sticky.params().friction, 0.1);
        assert_eq!(heavy.params().mass, 1000.0);

        for _ in 0..120 {
            heavy.step(DT);
            sticky.step(DT);
        }
        // Friction scales with mass, so only the coefficient changes speed.
        assert!(sticky.state().velocity < heavy.state().velocity);
    }

    #[test]
    fn too_few_points_is_an_error() {
        let err = Simulation::new(
            vec![ControlPoint::new(0.0, 0.0, 0.0, 0.0)],
            RideParams::default(),
            PhysicsConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err, CurveError::TooFewPoints { found: 1 });
    }

    #[test]
    fn default_ride_stays_finite() {
        let mut sim = default_sim();
        for _ in 0..3000 {
            let output = *sim.step(DT);
            assert!(output.position.is_finite());
            assert!(output.frame.is_finite());
            assert!(sim.state().forces.is_finite());
            assert!(sim.state().velocity.abs() <= sim.config().max_speed);
        }
    }
}
