use glam::Vec3;

use crate::device::{Gpu, SurfaceErrorAction, SurfaceSize};
use crate::math::{mvp_matrix, Transform};
use crate::render::{self, CubeSlot, PipelineBundle, UniformSink};
use crate::time::FrameClock;

use super::SceneConfig;

/// Control directive returned by the loop handlers.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Loop phase. Ticks are refused while `Resizing`; the surface and depth
/// buffer are mid-replacement.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopPhase {
    Running,
    Resizing,
}

/// Rotations of the two cubes at `t` seconds.
///
/// The pair is a quarter period out of phase: (sin t, cos t, 0) and
/// (cos t, sin t, 0).
pub fn cube_rotations(t: f32) -> [Vec3; 2] {
    let (s, c) = t.sin_cos();
    [Vec3::new(s, c, 0.0), Vec3::new(c, s, 0.0)]
}

/// Mutable state of the render loop: surface size, aspect, both transforms
/// and the frame clock.
#[derive(Debug)]
pub struct RenderLoopState {
    config: SceneConfig,
    size: SurfaceSize,
    scale_factor: f64,
    transforms: [Transform; 2],
    clock: FrameClock,
    phase: LoopPhase,
}

impl RenderLoopState {
    pub fn new(config: SceneConfig, size: SurfaceSize, scale_factor: f64) -> Self {
        let transforms = config.positions.map(|position| Transform {
            position,
            rotation: Vec3::ZERO,
            scale: config.scale,
        });

        let mut state = Self {
            config,
            size,
            scale_factor,
            transforms,
            clock: FrameClock::new(),
            phase: LoopPhase::Running,
        };
        state.set_time(0.0);
        state
    }

    #[inline]
    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    #[inline]
    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.size.aspect()
    }

    #[inline]
    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    #[inline]
    pub fn transforms(&self) -> &[Transform; 2] {
        &self.transforms
    }

    /// Whether another redraw should be scheduled. False while resizing and
    /// while the surface has no area; the next resize with area re-arms it.
    #[inline]
    pub fn wants_redraw(&self) -> bool {
        self.phase == LoopPhase::Running && !self.size.is_empty()
    }

    /// Overwrites rotation x and y of both cubes for time `t` (seconds).
    pub fn set_time(&mut self, t: f32) {
        for (transform, rotation) in self.transforms.iter_mut().zip(cube_rotations(t)) {
            transform.rotation.x = rotation.x;
            transform.rotation.y = rotation.y;
        }
    }

    /// MVP matrix of each cube for the current aspect ratio.
    pub fn matrices(&self) -> [[f32; 16]; 2] {
        let aspect = self.aspect();
        self.transforms
            .map(|t| mvp_matrix(&self.config.projection, aspect, &t))
    }

    /// Writes the first cube's matrix at offset 0 and the second's at 256.
    pub fn write_uniforms(&self, sink: &mut impl UniformSink) {
        let matrices = self.matrices();
        for slot in CubeSlot::ALL {
            render::write_matrix(sink, slot, &matrices[slot.index()]);
        }
    }

    /// Enters `Resizing` and records the new size. Returns `false` for an
    /// empty size, in which case GPU resources should be left alone until the
    /// next resize.
    pub fn begin_resize(&mut self, size: SurfaceSize, scale_factor: f64) -> bool {
        self.phase = LoopPhase::Resizing;
        self.size = size;
        self.scale_factor = scale_factor;
        !size.is_empty()
    }

    /// Back to `Running` once the surface and depth buffer match the new size.
    pub fn finish_resize(&mut self) {
        self.phase = LoopPhase::Running;
    }

    /// One tick: sample the clock, rotate, upload both matrices, draw.
    ///
    /// `before_present` runs right before submission. Surface errors are
    /// mapped to a [`LoopControl`]; only fatal ones stop the loop.
    pub fn tick(
        &mut self,
        gpu: &mut Gpu<'_>,
        bundle: &PipelineBundle,
        before_present: impl FnOnce(),
    ) -> LoopControl {
        if !self.wants_redraw() {
            return LoopControl::Continue;
        }

        self.set_time(self.clock.elapsed());

        self.write_uniforms(&mut bundle.uniform_sink(gpu.queue()));

        match render::render_frame(gpu, bundle, before_present) {
            Ok(()) => LoopControl::Continue,
            Err(err) => match gpu.handle_surface_error(err.clone()) {
                SurfaceErrorAction::Fatal => {
                    log::error!("surface error is fatal: {err:?}");
                    LoopControl::Exit
                }
                action => {
                    log::warn!("surface error {err:?}: {action:?}");
                    LoopControl::Continue
                }
            },
        }
    }

    /// Resize transition: reconfigure the surface and replace the depth buffer.
    pub fn resize(
        &mut self,
        gpu: &mut Gpu<'_>,
        bundle: &mut PipelineBundle,
        size: SurfaceSize,
        scale_factor: f64,
    ) {
        let has_area = self.begin_resize(size, scale_factor);
        gpu.resize(size);

        if has_area {
            bundle.replace_depth(gpu.device(), size);
            log::debug!("resized to {}x{} (aspect {:.3})", size.width, size.height, self.aspect());
        } else {
            log::debug!("surface has zero area; rendering paused");
        }

        self.finish_resize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::uniforms::tests::MirrorSink;

    const EPS: f32 = 1e-5;

    fn state() -> RenderLoopState {
        RenderLoopState::new(SceneConfig::default(), SurfaceSize::new(800, 600), 1.0)
    }

    fn assert_close(a: &[f32; 16], b: &[f32; 16]) {
        for (i, (x, y)) in a.iter().zip(b).enumerate() {
            assert!((x - y).abs() <= EPS, "element {i}: {x} != {y}");
        }
    }

    #[test]
    fn rotations_are_quarter_period_apart() {
        for t in [0.0f32, 0.3, 1.0, 2.5, 10.0, 123.4] {
            let [a, b] = cube_rotations(t);
            assert_eq!(a, Vec3::new(t.sin(), t.cos(), 0.0));
            assert_eq!(b, Vec3::new(t.cos(), t.sin(), 0.0));
        }
    }

    #[test]
    fn rotations_only_coincide_at_isolated_instants() {
        let [a, b] = cube_rotations(std::f32::consts::FRAC_PI_4);
        assert!((a - b).length() < EPS);

        let [a, b] = cube_rotations(1.0);
        assert!((a - b).length() > 0.1);
    }

    #[test]
    fn set_time_touches_only_rotation_xy() {
        let mut s = state();
        s.set_time(0.7);
        let [t1, t2] = *s.transforms();
        assert_eq!(t1.position, Vec3::new(2.0, 0.0, -7.0));
        assert_eq!(t2.position, Vec3::new(-2.0, 0.0, -7.0));
        assert_eq!(t1.scale, Vec3::ONE);
        assert_eq!(t1.rotation.z, 0.0);
        assert_eq!(t1.rotation.x, 0.7f32.sin());
        assert_eq!(t2.rotation.x, 0.7f32.cos());
    }

    #[test]
    fn first_frame_uses_expected_transforms() {
        let s = state();
        let [t1, t2] = *s.transforms();
        assert_eq!(t1.rotation, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(t2.rotation, Vec3::new(1.0, 0.0, 0.0));

        let proj = SceneConfig::default().projection;
        let aspect = 800.0 / 600.0;
        let expected1 = mvp_matrix(
            &proj,
            aspect,
            &Transform {
                position: Vec3::new(2.0, 0.0, -7.0),
                rotation: Vec3::new(0.0, 1.0, 0.0),
                scale: Vec3::ONE,
            },
        );
        let expected2 = mvp_matrix(
            &proj,
            aspect,
            &Transform {
                position: Vec3::new(-2.0, 0.0, -7.0),
                rotation: Vec3::new(1.0, 0.0, 0.0),
                scale: Vec3::ONE,
            },
        );

        let [m1, m2] = s.matrices();
        assert_close(&m1, &expected1);
        assert_close(&m2, &expected2);
    }

    #[test]
    fn uniform_upload_places_each_cube_in_its_slot() {
        let mut s = state();
        s.set_time(0.4);

        let mut sink = MirrorSink::new();
        s.write_uniforms(&mut sink);

        let [m1, m2] = s.matrices();
        assert_eq!(sink.matrix_at(CubeSlot::First), m1);
        assert_eq!(sink.matrix_at(CubeSlot::Second), m2);
        assert_eq!(sink.touched, vec![0..64, 256..320]);
        assert!(sink.bytes[64..256].iter().all(|b| *b == 0));
    }

    #[test]
    fn resize_updates_aspect() {
        let mut s = state();
        assert!(s.begin_resize(SurfaceSize::new(1920, 1080), 2.0));
        s.finish_resize();
        assert!((s.aspect() - 1920.0 / 1080.0).abs() < EPS);
        assert_eq!(s.scale_factor(), 2.0);

        let [m1, _] = s.matrices();
        let expected = mvp_matrix(&SceneConfig::default().projection, 1920.0 / 1080.0, &s.transforms()[0]);
        assert_close(&m1, &expected);
    }

    #[test]
    fn repeated_resize_is_idempotent() {
        let mut s = state();
        s.begin_resize(SurfaceSize::new(640, 480), 1.0);
        s.finish_resize();
        let first = (s.size(), s.matrices());
        s.begin_resize(SurfaceSize::new(640, 480), 1.0);
        s.finish_resize();
        assert_eq!((s.size(), s.matrices()), first);
    }

    #[test]
    fn resizing_phase_blocks_redraws_until_finished() {
        let mut s = state();
        assert_eq!(s.phase(), LoopPhase::Running);
        assert!(s.wants_redraw());

        s.begin_resize(SurfaceSize::new(1024, 768), 1.0);
        assert_eq!(s.phase(), LoopPhase::Resizing);
        assert!(!s.wants_redraw());

        s.finish_resize();
        assert_eq!(s.phase(), LoopPhase::Running);
        assert!(s.wants_redraw());
    }

    #[test]
    fn empty_size_pauses_redraws() {
        let mut s = state();
        assert!(!s.begin_resize(SurfaceSize::new(0, 600), 1.0));
        s.finish_resize();
        assert_eq!(s.size(), SurfaceSize::new(0, 600));
        assert_eq!(s.phase(), LoopPhase::Running);
        assert!(!s.wants_redraw());

        assert!(s.begin_resize(SurfaceSize::new(800, 600), 1.0));
        s.finish_resize();
        assert!(s.wants_redraw());
    }
}
