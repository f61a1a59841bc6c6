/// The legacy font size scale: `<font size>` values 1 through 7 and the
/// keywords they map onto.
pub const FONT_SIZE_SCALE: [&str; 7] = [
    "xx-small",
    "small",
    "medium",
    "large",
    "x-large",
    "xx-large",
    "xxx-large",
];

/// The editing commands this engine implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Bold,
    CreateLink,
    FontName,
    FontSize,
    ForeColor,
    HiliteColor,
    Indent,
    InsertHorizontalRule,
    InsertImage,
    Italic,
    Outdent,
    RemoveFormat,
    Strikethrough,
    StyleWithCss,
    Subscript,
    Superscript,
    Underline,
    Unlink,
    UseCss,
}

impl Command {
    /// Look up a command by its case-insensitive wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        Some(match lower.as_str() {
            "bold" => Self::Bold,
            "createlink" => Self::CreateLink,
            "fontname" => Self::FontName,
            "fontsize" => Self::FontSize,
            "forecolor" => Self::ForeColor,
            "hilitecolor" => Self::HiliteColor,
            "indent" => Self::Indent,
            "inserthorizontalrule" => Self::InsertHorizontalRule,
            "insertimage" => Self::InsertImage,
            "italic" => Self::Italic,
            "outdent" => Self::Outdent,
            "removeformat" => Self::RemoveFormat,
            "strikethrough" => Self::Strikethrough,
            "stylewithcss" => Self::StyleWithCss,
            "subscript" => Self::Subscript,
            "superscript" => Self::Superscript,
            "underline" => Self::Underline,
            "unlink" => Self::Unlink,
            "usecss" => Self::UseCss,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Bold => "bold",
            Self::CreateLink => "createlink",
            Self::FontName => "fontname",
            Self::FontSize => "fontsize",
            Self::ForeColor => "forecolor",
            Self::HiliteColor => "hilitecolor",
            Self::Indent => "indent",
            Self::InsertHorizontalRule => "inserthorizontalrule",
            Self::InsertImage => "insertimage",
            Self::Italic => "italic",
            Self::Outdent => "outdent",
            Self::RemoveFormat => "removeformat",
            Self::Strikethrough => "strikethrough",
            Self::StyleWithCss => "stylewithcss",
            Self::Subscript => "subscript",
            Self::Superscript => "superscript",
            Self::Underline => "underline",
            Self::Unlink => "unlink",
            Self::UseCss => "usecss",
        }
    }

    /// The CSS property a command's values live in, where there is one.
    /// Strikethrough and underline work on text-decoration lines and links
    /// on href, so they have none.
    pub fn relevant_css_property(self) -> Option<&'static str> {
        match self {
            Self::Bold => Some("font-weight"),
            Self::FontName => Some("font-family"),
            Self::FontSize => Some("font-size"),
            Self::ForeColor => Some("color"),
            Self::HiliteColor => Some("background-color"),
            Self::Italic => Some("font-style"),
            Self::Subscript | Self::Superscript => Some("vertical-align"),
            _ => None,
        }
    }

    /// Commands whose on/off state queries are meaningful.
    pub fn has_state(self) -> bool {
        matches!(
            self,
            Self::Bold
                | Self::Italic
                | Self::Strikethrough
                | Self::Underline
                | Self::Subscript
                | Self::Superscript
        )
    }
}
