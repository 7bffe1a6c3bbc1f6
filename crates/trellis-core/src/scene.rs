//! Retained paint list handed to the drawing collaborator. The core never
//! rasterizes; it records shapes, text runs, clips, and translations, and
//! the renderer replays them. Clip and transform nodes nest like a stack.

use crate::{Color, Rect, Vec2};

#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub clear_color: Color,
    pub nodes: Vec<SceneNode>,
}

#[derive(Clone, Debug)]
pub enum SceneNode {
    Rect {
        rect: Rect,
        color: Color,
        radius: f32,
    },
    Border {
        rect: Rect,
        color: Color,
        width: f32,
        radius: f32,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
        width: f32,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Text {
        pos: Vec2,
        text: String,
        color: Color,
    },
    PushClip {
        rect: Rect,
    },
    PopClip,
    PushTranslate {
        offset: Vec2,
    },
    PopTranslate,
}

impl Scene {
    pub fn rect(&mut self, rect: Rect, color: Color, radius: f32) {
        self.nodes.push(SceneNode::Rect { rect, color, radius });
    }

    pub fn border(&mut self, rect: Rect, color: Color, width: f32, radius: f32) {
        self.nodes.push(SceneNode::Border {
            rect,
            color,
            width,
            radius,
        });
    }

    pub fn line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32) {
        self.nodes.push(SceneNode::Line {
            from,
            to,
            color,
            width,
        });
    }

    pub fn circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.nodes.push(SceneNode::Circle {
            center,
            radius,
            color,
        });
    }

    pub fn text(&mut self, pos: Vec2, text: impl Into<String>, color: Color) {
        self.nodes.push(SceneNode::Text {
            pos,
            text: text.into(),
            color,
        });
    }

    pub fn push_clip(&mut self, rect: Rect) {
        self.nodes.push(SceneNode::PushClip { rect });
    }

    pub fn pop_clip(&mut self) {
        self.nodes.push(SceneNode::PopClip);
    }

    pub fn push_translate(&mut self, offset: Vec2) {
        self.nodes.push(SceneNode::PushTranslate { offset });
    }

    pub fn pop_translate(&mut self) {
        self.nodes.push(SceneNode::PopTranslate);
    }
}
