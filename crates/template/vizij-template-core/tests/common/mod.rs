#![allow(dead_code)]
//! Minimal JSON-scene engine implementing the template-core engine contracts.
//!
//! A scene is a tree of named nodes with optional color/opacity/transform/text
//! properties, image references and precomp references. Building a scene walks the
//! tree once, driving the observers in `BuildOptions` exactly like a real engine's
//! build pass. Property handles read and write shared node state so tests can check
//! what a `set` actually changed.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use serde::Deserialize;
use vizij_template_core::{
    Animation, AnimationFactory, BuildOptions, Canvas, ColorValue, ExternalLayer, FrameData,
    Image, ImageAsset, LazyHandle, NodeType, OpacityValue, PropertyHandle, Rect, RenderFlags,
    ResourceProvider, SharedHandle, Size, TextValue, TransformValue,
};

// ---------- scene document ----------

#[derive(Debug, Clone, Deserialize)]
pub struct SceneDoc {
    pub name: String,
    pub size: [f32; 2],
    #[serde(default)]
    pub markers: Vec<MarkerDoc>,
    #[serde(default)]
    pub layers: Vec<NodeDoc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarkerDoc {
    pub name: String,
    pub t0: f32,
    pub t1: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageRefDoc {
    pub path: String,
    pub name: String,
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PrecompRefDoc {
    #[serde(default)]
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NodeDoc {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default = "default_node_type")]
    pub node_type: NodeType,
    #[serde(default)]
    pub color: Option<ColorValue>,
    #[serde(default)]
    pub opacity: Option<OpacityValue>,
    #[serde(default)]
    pub transform: Option<TransformValue>,
    #[serde(default)]
    pub text: Option<TextValue>,
    #[serde(default)]
    pub image: Option<ImageRefDoc>,
    #[serde(default)]
    pub precomp: Option<PrecompRefDoc>,
    #[serde(default)]
    pub size: Option<[f32; 2]>,
    #[serde(default)]
    pub children: Vec<NodeDoc>,
}

fn default_node_type() -> NodeType {
    NodeType::Other
}

// ---------- built scene ----------

#[derive(Debug, Clone, Default)]
pub struct NodeProps {
    pub color: Option<ColorValue>,
    pub opacity: Option<OpacityValue>,
    pub transform: Option<TransformValue>,
    pub text: Option<TextValue>,
}

#[derive(Debug)]
pub struct SceneNode {
    pub name: Option<String>,
    pub path: String,
    pub props: RefCell<NodeProps>,
}

impl SceneNode {
    pub fn color(&self) -> Option<ColorValue> {
        self.props.borrow().color
    }

    pub fn opacity(&self) -> Option<OpacityValue> {
        self.props.borrow().opacity
    }

    pub fn transform(&self) -> Option<TransformValue> {
        self.props.borrow().transform.clone()
    }

    pub fn text(&self) -> Option<TextValue> {
        self.props.borrow().text.clone()
    }
}

/// Handle over one field of a scene node.
struct NodeHandle<V> {
    node: Rc<SceneNode>,
    read: fn(&NodeProps) -> V,
    write: fn(&mut NodeProps, &V),
}

impl<V> PropertyHandle<V> for NodeHandle<V> {
    fn get(&self) -> V {
        (self.read)(&self.node.props.borrow())
    }

    fn set(&self, value: &V) {
        (self.write)(&mut self.node.props.borrow_mut(), value)
    }
}

// ---------- recording canvas ----------

#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub scene: String,
    pub time: f64,
    pub dst: Option<Rect>,
    pub flags: RenderFlags,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageDraw {
    pub scene: String,
    pub node: String,
    pub width: Option<u32>,
}

#[derive(Default)]
pub struct RecordingCanvas {
    pub draws: Vec<DrawCall>,
    pub images: Vec<ImageDraw>,
}

impl Canvas for RecordingCanvas {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl RecordingCanvas {
    pub fn scenes(&self) -> Vec<&str> {
        self.draws.iter().map(|d| d.scene.as_str()).collect()
    }
}

// ---------- animation ----------

pub struct SceneAnimation {
    pub name: String,
    pub size: Size,
    time: Cell<f64>,
    nodes: Vec<Rc<SceneNode>>,
    images: Vec<(String, Rc<dyn ImageAsset>)>,
    externals: RefCell<Vec<(String, Box<dyn ExternalLayer>)>>,
}

impl SceneAnimation {
    /// All nodes in build order.
    pub fn nodes(&self) -> &[Rc<SceneNode>] {
        &self.nodes
    }

    pub fn nodes_named(&self, name: &str) -> Vec<Rc<SceneNode>> {
        self.nodes
            .iter()
            .filter(|n| n.name.as_deref() == Some(name))
            .cloned()
            .collect()
    }

    pub fn node_at(&self, path: &str) -> Rc<SceneNode> {
        self.nodes
            .iter()
            .find(|n| n.path == path)
            .cloned()
            .unwrap_or_else(|| panic!("no node at path '{path}'"))
    }

    pub fn image_for(&self, node: &str) -> Option<Rc<dyn ImageAsset>> {
        self.images
            .iter()
            .find(|(n, _)| n == node)
            .map(|(_, a)| Rc::clone(a))
    }

    /// Names of nodes whose precomp reference was handled externally.
    pub fn external_layers(&self) -> Vec<String> {
        self.externals
            .borrow()
            .iter()
            .map(|(n, _)| n.clone())
            .collect()
    }

    pub fn time(&self) -> f64 {
        self.time.get()
    }
}

impl Animation for SceneAnimation {
    fn seek_frame_time(&mut self, t: f64) {
        self.time.set(t);
    }

    fn render(&self, canvas: &mut dyn Canvas, dst: Option<Rect>, flags: RenderFlags) {
        let t = self.time.get();
        if let Some(rec) = canvas.as_any_mut().downcast_mut::<RecordingCanvas>() {
            rec.draws.push(DrawCall {
                scene: self.name.clone(),
                time: t,
                dst,
                flags,
            });
            for (node, asset) in &self.images {
                let frame: FrameData = asset.frame_data(t as f32);
                rec.images.push(ImageDraw {
                    scene: self.name.clone(),
                    node: node.clone(),
                    width: frame.image.map(|i| i.width()),
                });
            }
        }
        for (_, layer) in self.externals.borrow_mut().iter_mut() {
            layer.render(canvas, t);
        }
    }
}

// ---------- engine ----------

#[derive(Default)]
pub struct TestEngine {
    handles_built: Rc<Cell<usize>>,
    builds: Cell<usize>,
}

struct BuildCtx<'o> {
    options: &'o BuildOptions,
    path: Vec<String>,
    nodes: Vec<Rc<SceneNode>>,
    images: Vec<(String, Rc<dyn ImageAsset>)>,
    externals: Vec<(String, Box<dyn ExternalLayer>)>,
}

impl TestEngine {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Number of property handles materialized across all builds.
    pub fn handles_built(&self) -> usize {
        self.handles_built.get()
    }

    pub fn builds(&self) -> usize {
        self.builds.get()
    }

    pub fn build(&self, data: &[u8], options: BuildOptions) -> Option<SceneAnimation> {
        let doc: SceneDoc = serde_json::from_slice(data).ok()?;
        self.builds.set(self.builds.get() + 1);

        if let Some(markers) = &options.marker_observer {
            for m in &doc.markers {
                markers.on_marker(&m.name, m.t0, m.t1);
            }
        }

        let mut ctx = BuildCtx {
            options: &options,
            path: Vec::new(),
            nodes: Vec::new(),
            images: Vec::new(),
            externals: Vec::new(),
        };
        for layer in &doc.layers {
            self.visit(layer, &mut ctx);
        }

        Some(SceneAnimation {
            name: doc.name,
            size: Size::new(doc.size[0], doc.size[1]),
            time: Cell::new(0.0),
            nodes: ctx.nodes,
            images: ctx.images,
            externals: RefCell::new(ctx.externals),
        })
    }

    pub fn build_fixture(&self, name: &str, options: BuildOptions) -> SceneAnimation {
        let bytes = vizij_test_fixtures::scenes::bytes(name).expect("load scene fixture");
        self.build(&bytes, options).expect("build scene fixture")
    }

    fn lazy<'a, V: 'static>(
        &self,
        node: &Rc<SceneNode>,
        read: fn(&NodeProps) -> V,
        write: fn(&mut NodeProps, &V),
    ) -> LazyHandle<'a, V> {
        let node = Rc::clone(node);
        let counter = Rc::clone(&self.handles_built);
        LazyHandle::new(move || {
            counter.set(counter.get() + 1);
            Rc::new(NodeHandle { node, read, write }) as SharedHandle<V>
        })
    }

    fn visit(&self, doc: &NodeDoc, ctx: &mut BuildCtx<'_>) {
        let name = doc.name.as_deref();
        let options = ctx.options;
        let observer = options.property_observer.clone();
        if let Some(o) = &observer {
            o.on_enter_node(name, doc.node_type);
        }
        if let Some(n) = name {
            ctx.path.push(n.to_string());
        }

        let node = Rc::new(SceneNode {
            name: doc.name.clone(),
            path: ctx.path.join("/"),
            props: RefCell::new(NodeProps {
                color: doc.color,
                opacity: doc.opacity,
                transform: doc.transform.clone(),
                text: doc.text.clone(),
            }),
        });
        ctx.nodes.push(Rc::clone(&node));

        if let Some(o) = &observer {
            if doc.color.is_some() {
                let h = self.lazy(&node, |p| p.color.unwrap_or_default(), |p, v| p.color = Some(*v));
                o.on_color_property(name, &h);
            }
            if doc.opacity.is_some() {
                let h = self.lazy(
                    &node,
                    |p| p.opacity.unwrap_or_default(),
                    |p, v| p.opacity = Some(*v),
                );
                o.on_opacity_property(name, &h);
            }
            if doc.transform.is_some() {
                let h = self.lazy(
                    &node,
                    |p| p.transform.clone().unwrap_or_default(),
                    |p, v| p.transform = Some(v.clone()),
                );
                o.on_transform_property(name, &h);
            }
            if doc.text.is_some() {
                let h = self.lazy(
                    &node,
                    |p| p.text.clone().unwrap_or_default(),
                    |p, v| p.text = Some(v.clone()),
                );
                o.on_text_property(name, &h);
            }
        }

        if let (Some(image), Some(rp)) = (&doc.image, &options.resource_provider) {
            if let Some(asset) = rp.load_image_asset(&image.path, &image.name, &image.id) {
                ctx.images
                    .push((name.unwrap_or_default().to_string(), asset));
            }
        }

        if let (Some(precomp), Some(pi)) = (&doc.precomp, &options.precomp_interceptor) {
            let [w, h] = doc.size.unwrap_or([0.0, 0.0]);
            if let Some(layer) = pi.on_load_precomp(&precomp.id, &precomp.name, Size::new(w, h)) {
                ctx.externals
                    .push((name.unwrap_or_default().to_string(), layer));
            }
        }

        for child in &doc.children {
            self.visit(child, ctx);
        }

        if name.is_some() {
            ctx.path.pop();
        }
        if let Some(o) = &observer {
            o.on_leaving_node(name, doc.node_type);
        }
    }
}

impl AnimationFactory for TestEngine {
    fn make(&self, data: &[u8], options: BuildOptions) -> Option<Box<dyn Animation>> {
        self.build(data, options)
            .map(|a| Box::new(a) as Box<dyn Animation>)
    }
}

// ---------- resources ----------

pub struct TestImage {
    pub width: u32,
}

impl Image for TestImage {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.width
    }
}

/// Static image asset of a given width.
pub struct TestImageAsset {
    pub width: u32,
}

impl TestImageAsset {
    pub fn shared(width: u32) -> Rc<dyn ImageAsset> {
        Rc::new(Self { width })
    }
}

impl ImageAsset for TestImageAsset {
    fn is_multi_frame(&self) -> bool {
        false
    }

    fn frame_data(&self, _t: f32) -> FrameData {
        FrameData {
            image: Some(Rc::new(TestImage { width: self.width })),
            ..FrameData::default()
        }
    }
}

/// In-memory provider keyed by resource name (bytes) and asset id (images).
#[derive(Default)]
pub struct MapResourceProvider {
    pub blobs: HashMap<String, Vec<u8>>,
    pub images: HashMap<String, Rc<dyn ImageAsset>>,
    pub loads: RefCell<Vec<(String, String)>>,
    pub image_loads: RefCell<Vec<(String, String, String)>>,
}

impl MapResourceProvider {
    pub fn with_blob(mut self, name: &str, data: Vec<u8>) -> Self {
        self.blobs.insert(name.to_string(), data);
        self
    }

    pub fn with_image(mut self, id: &str, width: u32) -> Self {
        self.images
            .insert(id.to_string(), TestImageAsset::shared(width));
        self
    }
}

impl ResourceProvider for MapResourceProvider {
    fn load(&self, resource_path: &str, resource_name: &str) -> Option<Vec<u8>> {
        self.loads
            .borrow_mut()
            .push((resource_path.to_string(), resource_name.to_string()));
        self.blobs.get(resource_name).cloned()
    }

    fn load_image_asset(
        &self,
        resource_path: &str,
        resource_name: &str,
        resource_id: &str,
    ) -> Option<Rc<dyn ImageAsset>> {
        self.image_loads.borrow_mut().push((
            resource_path.to_string(),
            resource_name.to_string(),
            resource_id.to_string(),
        ));
        self.images.get(resource_id).cloned()
    }
}

pub fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

pub fn sorted(mut keys: Vec<String>) -> Vec<String> {
    keys.sort();
    keys
}
