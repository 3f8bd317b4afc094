//! Scene container enforcing the fixed body ordering the renderer relies on.

use std::error::Error;

use glam::Vec3A;

use crate::body::Body;
use crate::skybox::Skybox;

/// Index of the light body in every scene.
pub const LIGHT_INDEX: usize = 0;
/// Index of the ground plane in every scene.
pub const PLANE_INDEX: usize = 1;
/// Index of the first sphere in every scene.
pub const FIRST_SPHERE_INDEX: usize = 2;

/// An ordered collection of bodies plus the environment skybox.
///
/// Body ordering is a hard invariant: index 0 is the light, index 1 the
/// ground plane, everything from index 2 on a sphere. [`Scene::new`]
/// enforces this, so downstream code can rely on plain index comparisons
/// (a shadow feeler is blocked exactly when its hit index is past
/// [`PLANE_INDEX`]).
#[derive(Debug, Clone)]
pub struct Scene {
    bodies: Vec<Body>,
    skybox: Skybox,
}

impl Scene {
    /// Build a scene from an ordered body list and a skybox.
    ///
    /// Fails when the ordering invariant is broken or a body carries
    /// non-finite positions, non-positive radii, out-of-range colors or
    /// negative reflectivity.
    pub fn new(bodies: Vec<Body>, skybox: Skybox) -> Result<Self, Box<dyn Error>> {
        if bodies.len() < FIRST_SPHERE_INDEX {
            return Err(format!(
                "a scene needs at least a light and a ground plane, got {} bodies",
                bodies.len()
            )
            .into());
        }
        for (index, body) in bodies.iter().enumerate() {
            validate_body(index, body)?;
        }
        Ok(Self { bodies, skybox })
    }

    /// All bodies in index order.
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Number of bodies, light and plane included.
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// The environment skybox.
    pub fn skybox(&self) -> &Skybox {
        &self.skybox
    }

    /// Position, radius and color of the scene light.
    pub fn light(&self) -> (Vec3A, f32, Vec3A) {
        match self.bodies[LIGHT_INDEX] {
            Body::Light { position, radius, color } => (position, radius, color),
            // Scene::new rejects anything else at index 0.
            _ => unreachable!("body 0 is always the light"),
        }
    }

    /// Move a body between frames. The light and the spheres take the full
    /// position; the plane only uses the Y component as its new height.
    pub fn set_body_position(&mut self, index: usize, position: Vec3A) {
        match &mut self.bodies[index] {
            Body::Light { position: p, .. } | Body::Sphere { position: p, .. } => *p = position,
            Body::Plane { height, .. } => *height = position.y,
        }
    }
}

fn validate_body(index: usize, body: &Body) -> Result<(), Box<dyn Error>> {
    match (index, body) {
        (LIGHT_INDEX, Body::Light { position, radius, color }) => {
            validate_position(index, *position)?;
            validate_radius(index, *radius)?;
            validate_color(index, *color)
        }
        (PLANE_INDEX, Body::Plane { height, reflectivity }) => {
            if !height.is_finite() {
                return Err(format!("body {index}: plane height must be finite").into());
            }
            validate_reflectivity(index, *reflectivity)
        }
        (_, Body::Sphere { position, radius, color, reflectivity })
            if index >= FIRST_SPHERE_INDEX =>
        {
            validate_position(index, *position)?;
            validate_radius(index, *radius)?;
            validate_color(index, *color)?;
            validate_reflectivity(index, *reflectivity)
        }
        (LIGHT_INDEX, _) => Err("body 0 must be the light".into()),
        (PLANE_INDEX, _) => Err("body 1 must be the ground plane".into()),
        _ => Err(format!("body {index} must be a sphere").into()),
    }
}

fn validate_position(index: usize, position: Vec3A) -> Result<(), Box<dyn Error>> {
    if !position.is_finite() {
        return Err(format!("body {index}: position must be finite").into());
    }
    Ok(())
}

fn validate_radius(index: usize, radius: f32) -> Result<(), Box<dyn Error>> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(format!("body {index}: radius must be positive, got {radius}").into());
    }
    Ok(())
}

fn validate_color(index: usize, color: Vec3A) -> Result<(), Box<dyn Error>> {
    if !color.is_finite() || color.min_element() < 0.0 || color.max_element() > 1.0 {
        return Err(format!("body {index}: color channels must be in [0,1]").into());
    }
    Ok(())
}

fn validate_reflectivity(index: usize, reflectivity: f32) -> Result<(), Box<dyn Error>> {
    if !reflectivity.is_finite() || reflectivity < 0.0 {
        return Err(format!(
            "body {index}: reflectivity must be non-negative, got {reflectivity}"
        )
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn light() -> Body {
        Body::Light {
            position: Vec3A::new(1.0, 3.0, -1.5),
            radius: 0.4,
            color: Vec3A::ONE,
        }
    }

    fn plane() -> Body {
        Body::Plane { height: 0.0, reflectivity: 16.0 }
    }

    fn sphere() -> Body {
        Body::Sphere {
            position: Vec3A::new(0.0, 1.0, 0.0),
            radius: 1.0,
            color: Vec3A::new(0.8, 0.2, 0.2),
            reflectivity: 32.0,
        }
    }

    #[test]
    fn accepts_a_well_ordered_scene() {
        let scene = Scene::new(
            vec![light(), plane(), sphere(), sphere()],
            Skybox::solid(Vec3A::ONE),
        )
        .unwrap();
        assert_eq!(scene.body_count(), 4);
        let (position, radius, color) = scene.light();
        assert_eq!(position, Vec3A::new(1.0, 3.0, -1.5));
        assert_eq!(radius, 0.4);
        assert_eq!(color, Vec3A::ONE);
    }

    #[test]
    fn rejects_missing_or_misplaced_bodies() {
        let sky = Skybox::solid(Vec3A::ONE);
        assert!(Scene::new(vec![light()], sky.clone()).is_err());
        assert!(Scene::new(vec![plane(), light()], sky.clone()).is_err());
        assert!(Scene::new(vec![light(), sphere()], sky.clone()).is_err());
        assert!(Scene::new(vec![light(), plane(), light()], sky).is_err());
    }

    #[test]
    fn rejects_invalid_body_parameters() {
        let sky = Skybox::solid(Vec3A::ONE);
        let tiny = Body::Sphere {
            position: Vec3A::ZERO,
            radius: 0.0,
            color: Vec3A::ONE,
            reflectivity: 0.0,
        };
        assert!(Scene::new(vec![light(), plane(), tiny], sky.clone()).is_err());
        let loud = Body::Sphere {
            position: Vec3A::ZERO,
            radius: 1.0,
            color: Vec3A::new(1.5, 0.0, 0.0),
            reflectivity: 0.0,
        };
        assert!(Scene::new(vec![light(), plane(), loud], sky).is_err());
    }

    #[test]
    fn set_body_position_moves_bodies_and_plane_height() {
        let mut scene =
            Scene::new(vec![light(), plane(), sphere()], Skybox::solid(Vec3A::ONE)).unwrap();
        scene.set_body_position(FIRST_SPHERE_INDEX, Vec3A::new(5.0, 2.0, 5.0));
        assert_eq!(
            scene.bodies()[FIRST_SPHERE_INDEX].position(),
            Vec3A::new(5.0, 2.0, 5.0)
        );
        scene.set_body_position(PLANE_INDEX, Vec3A::new(9.0, -1.0, 9.0));
        assert_eq!(scene.bodies()[PLANE_INDEX].position().y, -1.0);
    }
}
