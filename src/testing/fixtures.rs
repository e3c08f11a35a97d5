//! Sample alert payloads.
//!
//! The GCN circular is taken from <https://gcn.gsfc.nasa.gov/gcn3_circulars.html>.

use std::fmt::Write;

pub const GCN_TITLE: &str = "GCN GRB OBSERVATION REPORT";
pub const GCN_NUMBER: &str = "40";
pub const GCN_SUBJECT: &str = "GRB980329 VLA observations";
pub const GCN_DATE: &str = "98/04/03 07:10:15 GMT";
pub const GCN_FROM: &str = "Greg Taylor at NRAO";
pub const GCN_BODY: &str = r#"
G.B. Taylor, D.A. Frail (NRAO), S.R. Kulkarni (Caltech), and
the BeppoSAX GRB team report:

We have observed the field containing the proposed x-ray counterpart
1SAX J0702.6+3850 of GRB 980329 (IAUC 6854) with the VLA at 8.4 GHz
on UT 1998 Mar 30.2, April 1.1, and April 2.1.  Observations on April
1.1 detected a radio source VLA J0702+3850 within the 1 arcminute
error circle of 1SAX J0702.6+3850.  The coordinates of
VLA J0702+3850 are: ra = 07h02m38.02170s dec = 38d50'44.0170" (equinox
J2000) with an uncertainty of 0.05 arcsec in each coordinate.  The
size of this radio source is less than 0.25 arcsec.  The density of
sources on the sky stronger than 250 microJy at this frequency is
0.0145 arcmin**-2.

The flux density measurements of VLA J0702+3850 are as follows:

Date(UT)   8.4 GHz Flux Density
--------   ----------------------
Mar 30.2   166 +/- 50 microJy
Apr  1.1   248 +/- 16    "
Apr  2.1    65 +/- 25    "

where the uncertainty in the measurement reflects the 1 sigma rms
noise in the image.  These measurements clearly demonstrate that
the radio source is variable on timescales of less than 1 day.
This rapid variability is similar to that observed in the
radio afterglow from GRB 970508.  We propose VLA J0702+3850
is the radio afterglow from GRB 980329.

Additional radio observations are in progress.
"#;

/// Width of the key column in a circular header block, e.g. `SUBJECT: `.
const HEADER_KEY_WIDTH: usize = 9;

/// Header block of a GCN circular.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GcnHeader {
    pub title: String,
    pub number: String,
    pub subject: String,
    pub date: String,
    pub from: String,
}

/// A GCN circular split into its header block and free-text body.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GcnCircular {
    pub header: GcnHeader,
    pub body: String,
}

impl GcnCircular {
    /// Renders the circular as plain text: aligned `KEY: value` lines, a blank line, the body.
    pub fn to_text(&self) -> String {
        let mut text = String::with_capacity(self.body.len() + 256);
        for (key, value) in [
            ("TITLE", &self.header.title),
            ("NUMBER", &self.header.number),
            ("SUBJECT", &self.header.subject),
            ("DATE", &self.header.date),
            ("FROM", &self.header.from),
        ] {
            // writing to a String can't fail
            let _ = writeln!(
                text,
                "{:<width$}{}",
                format!("{key}:"),
                value,
                width = HEADER_KEY_WIDTH
            );
        }
        text.push('\n');
        text.push_str(&self.body);
        text
    }
}

/// The sample circular in structured form.
pub fn circular_msg() -> GcnCircular {
    GcnCircular {
        header: GcnHeader {
            title: GCN_TITLE.to_string(),
            number: GCN_NUMBER.to_string(),
            subject: GCN_SUBJECT.to_string(),
            date: GCN_DATE.to_string(),
            from: GCN_FROM.to_string(),
        },
        body: GCN_BODY.to_string(),
    }
}

/// The sample circular as plain text.
pub fn circular_text() -> String {
    circular_msg().to_text()
}

/// A preliminary gravitational-wave notice in IVOA VOEvent v2.0 format.
pub const VOEVENT_XML: &str = r#"<?xml version='1.0' encoding='UTF-8'?>
<voe:VOEvent xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xmlns:voe="http://www.ivoa.net/xml/VOEvent/v2.0" xsi:schemaLocation="http://www.ivoa.net/xml/VOEvent/v2.0 http://www.ivoa.net/xml/VOEvent/VOEvent-v2.0.xsd" version="2.0" role="test" ivorn="ivo://gwnet/LVC#S200302c-1-Preliminary">
  <Who>
    <Date>2020-03-02T02:00:09</Date>
    <Author>
      <contactName>LIGO Scientific Collaboration and Virgo Collaboration</contactName>
    </Author>
  </Who>
  <What>
    <Param name="internal" dataType="int" value="0" ucd="meta.number">
      <Description>Indicates whether this event should be distributed to LSC/Virgo members only</Description>
    </Param>
    <Param name="Packet_Type" dataType="int" value="150" ucd="meta.number">
      <Description>The Notice Type (150: Preliminary, 151: Initial, 152: Update)</Description>
    </Param>
    <Param name="Pkt_Ser_Num" dataType="string" value="1" ucd="meta.number">
      <Description>A number that increments by 1 each time a new revision is issued for this event</Description>
    </Param>
    <Param name="GraceID" dataType="string" value="S200302c" ucd="meta.id">
      <Description>Identifier in GraceDB</Description>
    </Param>
    <Param name="AlertType" dataType="string" value="Preliminary" ucd="meta.version">
      <Description>VOEvent alert type</Description>
    </Param>
    <Param name="HardwareInj" dataType="int" value="0" ucd="meta.number">
      <Description>Indicates that this event is a hardware injection if 1, no if 0</Description>
    </Param>
    <Param name="FAR" dataType="float" value="9.349090689198611e-09" ucd="arith.rate;stat.falsealarm" unit="Hz">
      <Description>False alarm rate for GW candidates with this strength or greater</Description>
    </Param>
    <Param name="Instruments" dataType="string" value="H1,V1" ucd="meta.code">
      <Description>List of instruments used in analysis to identify this event</Description>
    </Param>
    <Param name="Group" dataType="string" value="CBC" ucd="meta.code">
      <Description>Data analysis working group</Description>
    </Param>
    <Param name="Pipeline" dataType="string" value="gstlal" ucd="meta.code">
      <Description>Low-latency data analysis pipeline</Description>
    </Param>
    <Group type="GW_SKYMAP" name="bayestar">
      <Param name="skymap_fits" dataType="string" value="https://gracedb.ligo.org/api/superevents/S200302c/files/bayestar.fits.gz,0" ucd="meta.ref.url">
        <Description>Sky Map FITS</Description>
      </Param>
    </Group>
    <Group type="Classification">
      <Param name="BNS" dataType="float" value="0.0" ucd="stat.probability">
        <Description>Probability that the source is a binary neutron star merger (both objects lighter than 3 solar masses)</Description>
      </Param>
      <Param name="BBH" dataType="float" value="0.89" ucd="stat.probability">
        <Description>Probability that the source is a binary black hole merger (both objects heavier than 5 solar masses)</Description>
      </Param>
      <Param name="Terrestrial" dataType="float" value="0.11" ucd="stat.probability">
        <Description>Probability that the source is terrestrial (i.e., a background noise fluctuation or a glitch)</Description>
      </Param>
    </Group>
  </What>
  <WhereWhen>
    <ObsDataLocation>
      <ObservatoryLocation id="LIGO Virgo"/>
      <ObservationLocation>
        <AstroCoordSystem id="UTC-FK5-GEO"/>
        <AstroCoords coord_system_id="UTC-FK5-GEO">
          <Time unit="s">
            <TimeInstant>
              <ISOTime>2020-03-02T01:58:11.519119</ISOTime>
            </TimeInstant>
          </Time>
        </AstroCoords>
      </ObservationLocation>
    </ObsDataLocation>
  </WhereWhen>
  <Description>Report of a candidate gravitational wave event</Description>
  <How>
    <Description>Candidate gravitational wave event identified by low-latency analysis</Description>
    <Description>H1: LIGO Hanford 4 km gravitational wave detector</Description>
    <Description>V1: Virgo 3 km gravitational wave detector</Description>
  </How>
</voe:VOEvent>
"#;

/// The sample VOEvent document.
pub fn voevent_xml() -> &'static str {
    VOEVENT_XML
}

/// An unstructured text payload.
pub const BLOB_TEXT: &str = "This is an unstructured blob of text. \
It carries no header block and no markup, and consumers should pass it through untouched.";

/// The sample unstructured payload.
pub fn blob_text() -> &'static str {
    BLOB_TEXT
}
