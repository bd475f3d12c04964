//! Blank one-slide presentation.
//!
//! [`BlankDeck`] produces the smallest package PowerPoint and LibreOffice open
//! without repair: one master, one blank layout, one theme and a single empty
//! slide. The patcher then adds pictures and text to that slide.

use infodeck_ooxml::{ContentTypes, Package, Relationships};

use crate::constants::*;

/// Builder for a blank presentation package
#[derive(Debug, Clone)]
pub struct BlankDeck {
    /// Slide size in EMU
    slide_size: (i64, i64),
    title: Option<String>,
    author: Option<String>,
    timestamp: String,
}

impl Default for BlankDeck {
    fn default() -> Self {
        Self::new()
    }
}

impl BlankDeck {
    /// 16:9 deck (10" x 5.625")
    pub fn new() -> Self {
        Self {
            slide_size: (WIDESCREEN_SLIDE_WIDTH_EMU, WIDESCREEN_SLIDE_HEIGHT_EMU),
            title: None,
            author: None,
            timestamp: DEFAULT_TIMESTAMP.to_string(),
        }
    }

    /// Set slide size in EMU
    pub fn with_slide_size(mut self, width_emu: i64, height_emu: i64) -> Self {
        self.slide_size = (width_emu, height_emu);
        self
    }

    /// Set document title (core properties)
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set document author (core properties)
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set the W3CDTF created/modified stamp
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    pub fn slide_size(&self) -> (i64, i64) {
        self.slide_size
    }

    /// Build the package in memory
    pub fn build(&self) -> Package {
        let mut package = Package::new();

        package.set_content_types(&self.content_types());
        package.set_relationships("", &self.root_rels());
        package.set_string("docProps/app.xml", self.app_xml());
        package.set_string("docProps/core.xml", self.core_xml());

        package.set_string(PRESENTATION_PATH, self.presentation_xml());
        package.set_relationships(PRESENTATION_PATH, &self.presentation_rels());
        package.set_string("ppt/presProps.xml", self.pres_props_xml());
        package.set_string("ppt/tableStyles.xml", self.table_styles_xml());
        package.set_string("ppt/viewProps.xml", self.view_props_xml());
        package.set_string("ppt/theme/theme1.xml", self.theme_xml());

        package.set_string(MASTER_PATH, self.slide_master_xml());
        let mut master_rels = Relationships::new();
        master_rels.add("../slideLayouts/slideLayout1.xml", REL_TYPE_SLIDE_LAYOUT);
        master_rels.add("../theme/theme1.xml", REL_TYPE_THEME);
        package.set_relationships(MASTER_PATH, &master_rels);

        package.set_string(LAYOUT_PATH, self.blank_layout_xml());
        let mut layout_rels = Relationships::new();
        layout_rels.add("../slideMasters/slideMaster1.xml", REL_TYPE_SLIDE_MASTER);
        package.set_relationships(LAYOUT_PATH, &layout_rels);

        package.set_string(DEFAULT_SLIDE_PATH, self.slide_xml());
        let mut slide_rels = Relationships::new();
        slide_rels.add("../slideLayouts/slideLayout1.xml", REL_TYPE_SLIDE_LAYOUT);
        package.set_relationships(DEFAULT_SLIDE_PATH, &slide_rels);

        package
    }

    /// Build and serialize to ZIP bytes
    pub fn to_bytes(&self) -> crate::Result<Vec<u8>> {
        Ok(self.build().to_bytes()?)
    }

    fn content_types(&self) -> ContentTypes {
        let mut types = ContentTypes::new();
        types.ensure_default("rels", "application/vnd.openxmlformats-package.relationships+xml");
        types.ensure_default("xml", "application/xml");
        for (part, content_type) in [
            (PRESENTATION_PATH, CT_PRESENTATION),
            ("ppt/presProps.xml", CT_PRES_PROPS),
            ("ppt/tableStyles.xml", CT_TABLE_STYLES),
            ("ppt/viewProps.xml", CT_VIEW_PROPS),
            ("ppt/theme/theme1.xml", CT_THEME),
            (MASTER_PATH, CT_SLIDE_MASTER),
            (LAYOUT_PATH, CT_SLIDE_LAYOUT),
            (DEFAULT_SLIDE_PATH, CT_SLIDE),
            ("docProps/core.xml", CT_CORE_PROPERTIES),
            ("docProps/app.xml", CT_EXTENDED_PROPERTIES),
        ] {
            types.set_override(part, content_type);
        }
        types
    }

    fn root_rels(&self) -> Relationships {
        let mut rels = Relationships::new();
        rels.add(PRESENTATION_PATH, Relationships::TYPE_OFFICE_DOCUMENT);
        rels.add("docProps/core.xml", Relationships::TYPE_CORE_PROPERTIES);
        rels.add("docProps/app.xml", Relationships::TYPE_EXTENDED_PROPERTIES);
        rels
    }

    fn presentation_rels(&self) -> Relationships {
        // rId1 master, rId2 slide: presentation.xml refers to both by id.
        let mut rels = Relationships::new();
        rels.add("slideMasters/slideMaster1.xml", REL_TYPE_SLIDE_MASTER);
        rels.add("slides/slide1.xml", REL_TYPE_SLIDE);
        rels.add("presProps.xml", Relationships::TYPE_PRES_PROPS);
        rels.add("viewProps.xml", Relationships::TYPE_VIEW_PROPS);
        rels.add("theme/theme1.xml", REL_TYPE_THEME);
        rels.add("tableStyles.xml", Relationships::TYPE_TABLE_STYLES);
        rels
    }

    fn app_xml(&self) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">
  <TotalTime>0</TotalTime>
  <Words>0</Words>
  <Application>infodeck</Application>
  <PresentationFormat>{}</PresentationFormat>
  <Paragraphs>0</Paragraphs>
  <Slides>1</Slides>
  <Notes>0</Notes>
  <HiddenSlides>0</HiddenSlides>
  <MMClips>0</MMClips>
  <ScaleCrop>false</ScaleCrop>
  <LinksUpToDate>false</LinksUpToDate>
  <SharedDoc>false</SharedDoc>
  <HyperlinksChanged>false</HyperlinksChanged>
  <AppVersion>{}</AppVersion>
</Properties>"#,
            self.presentation_format(),
            env!("CARGO_PKG_VERSION")
        )
    }

    fn presentation_format(&self) -> &'static str {
        let (cx, cy) = self.slide_size;
        if cy > 0 && ((cx as f64 / cy as f64) - 16.0 / 9.0).abs() < 0.01 {
            "On-screen Show (16:9)"
        } else if cy > 0 && ((cx as f64 / cy as f64) - 4.0 / 3.0).abs() < 0.01 {
            "On-screen Show (4:3)"
        } else {
            "Custom"
        }
    }

    fn core_xml(&self) -> String {
        let title = self.title.as_deref().unwrap_or("Infographic");
        let author = self.author.as_deref().unwrap_or("infodeck");
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <dc:title>{}</dc:title>
  <dc:creator>{}</dc:creator>
  <cp:lastModifiedBy>{}</cp:lastModifiedBy>
  <dcterms:created xsi:type="dcterms:W3CDTF">{}</dcterms:created>
  <dcterms:modified xsi:type="dcterms:W3CDTF">{}</dcterms:modified>
</cp:coreProperties>"#,
            escape_xml(title),
            escape_xml(author),
            escape_xml(author),
            escape_xml(&self.timestamp),
            escape_xml(&self.timestamp)
        )
    }

    fn presentation_xml(&self) -> String {
        let (cx, cy) = self.slide_size;
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation xmlns:a="{}" xmlns:r="{}" xmlns:p="{}" saveSubsetFonts="1">
  <p:sldMasterIdLst>
    <p:sldMasterId id="2147483648" r:id="rId1"/>
  </p:sldMasterIdLst>
  <p:sldIdLst>
    <p:sldId id="256" r:id="rId2"/>
  </p:sldIdLst>
  <p:sldSz cx="{}" cy="{}"/>
  <p:notesSz cx="{}" cy="{}"/>
</p:presentation>"#,
            NS_DRAWING,
            NS_RELATIONSHIPS,
            NS_PRESENTATION,
            cx,
            cy,
            cy, // Notes are rotated
            cx
        )
    }

    fn pres_props_xml(&self) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentationPr xmlns:a="{}" xmlns:r="{}" xmlns:p="{}"/>"#,
            NS_DRAWING, NS_RELATIONSHIPS, NS_PRESENTATION
        )
    }

    fn table_styles_xml(&self) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:tblStyleLst xmlns:a="{}" def="{{5C22544A-7EE6-4342-B048-85BDC9FD1C3A}}"/>"#,
            NS_DRAWING
        )
    }

    fn view_props_xml(&self) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:viewPr xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">
  <p:normalViewPr>
    <p:restoredLeft sz="15620"/>
    <p:restoredTop sz="94660"/>
  </p:normalViewPr>
  <p:slideViewPr>
    <p:cSldViewPr>
      <p:cViewPr>
        <p:scale>
          <a:sx n="100" d="100"/>
          <a:sy n="100" d="100"/>
        </p:scale>
        <p:origin x="0" y="0"/>
      </p:cViewPr>
    </p:cSldViewPr>
  </p:slideViewPr>
</p:viewPr>"#,
            NS_DRAWING, NS_RELATIONSHIPS, NS_PRESENTATION
        )
    }

    /// Office color scheme; CJK typefaces as the east-asian theme fonts.
    fn theme_xml(&self) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:theme xmlns:a="{}" name="infodeck">
  <a:themeElements>
    <a:clrScheme name="Office">
      <a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1>
      <a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1>
      <a:dk2><a:srgbClr val="44546A"/></a:dk2>
      <a:lt2><a:srgbClr val="E7E6E6"/></a:lt2>
      <a:accent1><a:srgbClr val="4472C4"/></a:accent1>
      <a:accent2><a:srgbClr val="ED7D31"/></a:accent2>
      <a:accent3><a:srgbClr val="A5A5A5"/></a:accent3>
      <a:accent4><a:srgbClr val="FFC000"/></a:accent4>
      <a:accent5><a:srgbClr val="5B9BD5"/></a:accent5>
      <a:accent6><a:srgbClr val="70AD47"/></a:accent6>
      <a:hlink><a:srgbClr val="0563C1"/></a:hlink>
      <a:folHlink><a:srgbClr val="954F72"/></a:folHlink>
    </a:clrScheme>
    <a:fontScheme name="infodeck">
      <a:majorFont>
        <a:latin typeface="{sans}"/>
        <a:ea typeface="{sans}"/>
        <a:cs typeface=""/>
      </a:majorFont>
      <a:minorFont>
        <a:latin typeface="{sans}"/>
        <a:ea typeface="{sans}"/>
        <a:cs typeface=""/>
      </a:minorFont>
    </a:fontScheme>
    <a:fmtScheme name="Office">
      <a:fillStyleLst>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
      </a:fillStyleLst>
      <a:lnStyleLst>
        <a:ln w="6350"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>
        <a:ln w="12700"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>
        <a:ln w="19050"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>
      </a:lnStyleLst>
      <a:effectStyleLst>
        <a:effectStyle><a:effectLst/></a:effectStyle>
        <a:effectStyle><a:effectLst/></a:effectStyle>
        <a:effectStyle><a:effectLst/></a:effectStyle>
      </a:effectStyleLst>
      <a:bgFillStyleLst>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
      </a:bgFillStyleLst>
    </a:fmtScheme>
  </a:themeElements>
</a:theme>"#,
            NS_DRAWING,
            sans = THEME_FONT
        )
    }

    fn slide_master_xml(&self) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldMaster xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">
  <p:cSld>
    <p:bg>
      <p:bgRef idx="1001">
        <a:schemeClr val="bg1"/>
      </p:bgRef>
    </p:bg>
    <p:spTree>
      <p:nvGrpSpPr>
        <p:cNvPr id="1" name=""/>
        <p:cNvGrpSpPr/>
        <p:nvPr/>
      </p:nvGrpSpPr>
      <p:grpSpPr/>
    </p:spTree>
  </p:cSld>
  <p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>
  <p:sldLayoutIdLst>
    <p:sldLayoutId id="2147483649" r:id="rId1"/>
  </p:sldLayoutIdLst>
</p:sldMaster>"#,
            NS_DRAWING, NS_RELATIONSHIPS, NS_PRESENTATION
        )
    }

    fn blank_layout_xml(&self) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldLayout xmlns:a="{}" xmlns:r="{}" xmlns:p="{}" type="blank" preserve="1">
  <p:cSld name="Blank">
    <p:spTree>
      <p:nvGrpSpPr>
        <p:cNvPr id="1" name=""/>
        <p:cNvGrpSpPr/>
        <p:nvPr/>
      </p:nvGrpSpPr>
      <p:grpSpPr/>
    </p:spTree>
  </p:cSld>
  <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>
</p:sldLayout>"#,
            NS_DRAWING, NS_RELATIONSHIPS, NS_PRESENTATION
        )
    }

    fn slide_xml(&self) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">
  <p:cSld>
    <p:spTree>
      <p:nvGrpSpPr>
        <p:cNvPr id="1" name=""/>
        <p:cNvGrpSpPr/>
        <p:nvPr/>
      </p:nvGrpSpPr>
      <p:grpSpPr>
        <a:xfrm>
          <a:off x="0" y="0"/>
          <a:ext cx="0" cy="0"/>
          <a:chOff x="0" y="0"/>
          <a:chExt cx="0" cy="0"/>
        </a:xfrm>
      </p:grpSpPr>
    </p:spTree>
  </p:cSld>
  <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>
</p:sld>"#,
            NS_DRAWING, NS_RELATIONSHIPS, NS_PRESENTATION
        )
    }
}

/// Escape XML special characters
pub(crate) fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
