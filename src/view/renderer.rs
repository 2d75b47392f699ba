use crate::scene::{CursorText, Layer, Scene, Shape};

/// One unit of work for the drawing collaborator.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderUpdate {
    Scene(Scene),
    Layer(Layer, Vec<Shape>),
    Clear(Layer),
    Cursor(CursorText),
}

pub trait Renderer {
    fn draw(&mut self, update: RenderUpdate);
}

/// Renderer that keeps the composed result for later retrieval.
#[derive(Debug, Default)]
pub struct SceneStore {
    scene: Option<Scene>,
    cursor: CursorText,
    draws: u64,
}

impl SceneStore {
    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    pub fn cursor(&self) -> &CursorText {
        &self.cursor
    }

    pub fn draws(&self) -> u64 {
        self.draws
    }
}

impl Renderer for SceneStore {
    fn draw(&mut self, update: RenderUpdate) {
        self.draws += 1;
        match update {
            RenderUpdate::Scene(scene) => self.scene = Some(scene),
            RenderUpdate::Layer(layer, shapes) => {
                if let Some(scene) = &mut self.scene {
                    scene.set_layer(layer, shapes);
                }
            }
            RenderUpdate::Clear(layer) => {
                if let Some(scene) = &mut self.scene {
                    scene.clear(layer);
                }
            }
            RenderUpdate::Cursor(text) => self.cursor = text,
        }
    }
}
