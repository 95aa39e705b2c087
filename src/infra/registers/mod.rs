//! Access contract for one DCAN interface register set (IF1/IF2) and for the
//! new-data bitmap. The mailbox drivers only talk to the controller through
//! these traits, so a simulated controller can stand in for the silicon.
//!
//! Each call is a single register access. No read-modify-write sequence is
//! assumed to be atomic beyond the width of one access.

pub mod mmio;

//==================================================================================BITS
/// Bit layout of the interface register fields.
pub mod bits {
    // IFxSTAT
    /// The interface register set is transferring to/from the message RAM.
    pub const STAT_BUSY: u8 = 0x80;

    // IFxCMD
    /// Direction: write interface registers into the message object (read when clear).
    pub const CMD_WR: u8 = 0x80;
    /// Transfer the mask bits.
    pub const CMD_MASK: u8 = 0x40;
    /// Transfer the arbitration bits.
    pub const CMD_ARB: u8 = 0x20;
    /// Transfer the message control bits.
    pub const CMD_CONTROL: u8 = 0x10;
    /// Clear the interrupt pending bit.
    pub const CMD_CLR_INT_PND: u8 = 0x08;
    /// Write: request transmission. Read: clear the NewDat bit.
    pub const CMD_TXRQST_NEWDAT: u8 = 0x04;
    /// Transfer data bytes 0-3.
    pub const CMD_DATA_A: u8 = 0x02;
    /// Transfer data bytes 4-7.
    pub const CMD_DATA_B: u8 = 0x01;

    // IFxARB
    /// Message object is valid.
    pub const ARB_MSG_VAL: u32 = 0x8000_0000;
    /// 29-bit extended identifier.
    pub const ARB_XTD: u32 = 0x4000_0000;
    /// Transmit direction.
    pub const ARB_DIR: u32 = 0x2000_0000;
    /// Identifier bits of an extended frame.
    pub const ARB_ID_MASK: u32 = 0x1FFF_FFFF;

    // IFxMCTL
    pub const MCTL_NEW_DAT: u32 = 0x0000_8000;
    /// A newer message overwrote one that was never read.
    pub const MCTL_MSG_LST: u32 = 0x0000_4000;
    pub const MCTL_INT_PND: u32 = 0x0000_2000;
    /// Use the acceptance mask.
    pub const MCTL_UMASK: u32 = 0x0000_1000;
    pub const MCTL_TX_IE: u32 = 0x0000_0800;
    pub const MCTL_RX_IE: u32 = 0x0000_0400;
    /// End of block: single message object, no FIFO chaining.
    pub const MCTL_EOB: u32 = 0x0000_0080;
    pub const MCTL_DLC_MASK: u32 = 0x0000_000F;
}

//==================================================================================TRAITS
/// One interface register set: the staging area between software and a
/// message object of the controller.
pub trait InterfaceRegisters {
    /// IFxSTAT.
    fn status(&self) -> u8;
    /// IFxCMD.
    fn write_command(&mut self, command: u8);
    /// IFxNO. Writing it starts the transfer selected by the command byte.
    fn write_message_number(&mut self, number: u8);
    /// IFxMSK.
    fn write_mask(&mut self, value: u32);
    /// IFxARB.
    fn write_arbitration(&mut self, value: u32);
    fn read_arbitration(&self) -> u32;
    /// IFxMCTL.
    fn write_control(&mut self, value: u32);
    fn read_control(&self) -> u32;
    /// Physical data byte slot `slot` (0..8) of IFxDATA/IFxDATB.
    fn write_data(&mut self, slot: usize, byte: u8);
    fn read_data(&self, slot: usize) -> u8;

    /// Whether a transfer is still in progress.
    #[inline]
    fn is_busy(&self) -> bool {
        self.status() & bits::STAT_BUSY == bits::STAT_BUSY
    }
}

/// New-data bitmap (NWDATx): one bit per message object.
pub trait NewDataRegisters {
    /// Read bitmap word `word` (0..NEW_DATA_WORDS).
    fn new_data(&self, word: usize) -> u32;
}
