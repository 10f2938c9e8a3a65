use egui::Pos2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InteractionMode {
    #[default]
    Hand,
    Point,
    Box,
}

impl InteractionMode {
    pub const ALL: [Self; 3] = [Self::Hand, Self::Point, Self::Box];

    pub fn next(self) -> Self {
        match self {
            Self::Hand => Self::Point,
            Self::Point => Self::Box,
            Self::Box => Self::Hand,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Hand => "Hand",
            Self::Point => "Point",
            Self::Box => "Box",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PixelCoord {
    pub x: i32,
    pub y: i32,
}

impl PixelCoord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn from_image_pos(pos: Pos2) -> Self {
        Self {
            x: pos.x.floor() as i32,
            y: pos.y.floor() as i32,
        }
    }

    pub fn to_pos2(self) -> Pos2 {
        Pos2::new(self.x as f32, self.y as f32)
    }

    pub fn label(self) -> String {
        format!("({}, {})", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoxCorners {
    pub min: PixelCoord,
    pub max: PixelCoord,
}

impl BoxCorners {
    pub fn from_corners(a: PixelCoord, b: PixelCoord) -> Self {
        Self {
            min: PixelCoord::new(a.x.min(b.x), a.y.min(b.y)),
            max: PixelCoord::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn width(&self) -> i32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> i32 {
        self.max.y - self.min.y
    }

    pub fn label(&self) -> String {
        format!(
            "{}-{} {}x{}",
            self.min.label(),
            self.max.label(),
            self.width(),
            self.height()
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Marker {
    Point(PixelCoord),
    Box(BoxCorners),
}

impl Marker {
    pub fn label(&self) -> String {
        match self {
            Self::Point(coord) => coord.label(),
            Self::Box(corners) => corners.label(),
        }
    }

    pub fn is_point(&self) -> bool {
        matches!(self, Self::Point(_))
    }

    pub fn is_box(&self) -> bool {
        matches!(self, Self::Box(_))
    }
}
