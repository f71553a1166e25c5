use binrw::{
    BinRead, BinResult, BinWrite, Endian,
    io::{Read, Seek, Write},
};

use crate::chips::ChipFamily;

// The chip is a single tag byte; EMC181x variants each get their own tag.
impl BinRead for ChipFamily {
    type Args<'a> = ();

    fn read_options<R: Read + Seek>(
        reader: &mut R,
        endian: Endian,
        args: Self::Args<'_>,
    ) -> BinResult<Self> {
        let pos = reader.stream_position()?;
        let tag = u8::read_options(reader, endian, args)?;
        ChipFamily::from_tag(tag).ok_or_else(|| binrw::Error::AssertFail {
            pos,
            message: format!("unknown chip tag 0x{:02x}", tag),
        })
    }
}

impl BinWrite for ChipFamily {
    type Args<'a> = ();

    fn write_options<W: Write + Seek>(
        &self,
        writer: &mut W,
        endian: Endian,
        args: Self::Args<'_>,
    ) -> BinResult<()> {
        self.tag().write_options(writer, endian, args)
    }
}
