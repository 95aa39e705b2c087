/// Test doubles simulating the DCAN controller, the upstream sink, and the
/// network registry during integration tests.
use dcan_mailbox::infra::registers::{bits::*, InterfaceRegisters, NewDataRegisters};
use dcan_mailbox::protocol::transport::{
    can_frame::CanFrame,
    traits::{
        frame_transmit::FrameTransmit,
        network_registry::NetworkRegistry,
        upstream_sink::{Delivery, Reschedule, UpstreamSink},
    },
};
use embedded_can::ExtendedId;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(dead_code)]
/// One register write issued by a driver.
pub enum RegWrite {
    Mask(u32),
    Arbitration(u32),
    Control(u32),
    Command(u8),
    Data { slot: usize, byte: u8 },
    MessageNumber(u8),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
/// Content of one message object in the simulated message RAM.
pub struct MessageObject {
    pub arb: u32,
    pub mctl: u32,
    pub data: [u8; 8],
}

#[derive(Debug, Default)]
/// State of one interface register set.
pub struct InterfaceState {
    pub mask: u32,
    pub arb: u32,
    pub mctl: u32,
    pub cmd: u8,
    pub data: [u8; 8],
    pub writes: Vec<RegWrite>,
    pub status_reads: u32,
    /// Status reads still reporting busy.
    pub busy_polls: u32,
    /// Busy reads armed by every message number write (transfer latency).
    pub busy_after_transfer: u32,
    /// Never leaves the busy state.
    pub stuck: bool,
}

#[derive(Debug)]
pub struct ControllerState {
    /// Indexed by message box number (index 0 unused).
    pub objects: [MessageObject; 65],
    pub new_data: [u32; 4],
    pub new_data_reads: u32,
    pub if1: InterfaceState,
    pub if2: InterfaceState,
    /// Objects committed with a transmit request, in order.
    pub transmitted: Vec<(u8, MessageObject)>,
}

impl Default for ControllerState {
    fn default() -> Self {
        Self {
            objects: [MessageObject::default(); 65],
            new_data: [0; 4],
            new_data_reads: 0,
            if1: InterfaceState::default(),
            if2: InterfaceState::default(),
            transmitted: Vec::new(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Set {
    If1,
    If2,
}

#[derive(Clone, Default)]
/// Simulated DCAN controller shared by the register handles and the test.
pub struct SimController {
    state: Arc<Mutex<ControllerState>>,
}

#[allow(dead_code)]
impl SimController {
    pub fn new() -> Self {
        Self::default()
    }

    /// IF1, used by the transmit path.
    pub fn tx_interface(&self) -> SimInterface {
        SimInterface {
            state: self.state.clone(),
            set: Set::If1,
        }
    }

    /// IF2, used by the receive path.
    pub fn rx_interface(&self) -> SimInterface {
        SimInterface {
            state: self.state.clone(),
            set: Set::If2,
        }
    }

    pub fn new_data(&self) -> SimNewData {
        SimNewData {
            state: self.state.clone(),
        }
    }

    /// Run `f` on the controller state.
    pub fn with<T>(&self, f: impl FnOnce(&mut ControllerState) -> T) -> T {
        let mut state = self.state.lock().unwrap();
        f(&mut state)
    }

    /// Place a received message in box `number` with its data slots in memory
    /// order, and raise its new-data bit.
    pub fn load_mailbox(&self, number: u8, id: u32, slots: &[u8], lost: bool) {
        let mut data = [0u8; 8];
        data[..slots.len()].copy_from_slice(slots);
        self.load_raw(number, id, slots.len() as u32, data, lost);
    }

    /// Same as `load_mailbox` with an explicit DLC field, which may exceed 8.
    pub fn load_raw(&self, number: u8, id: u32, dlc: u32, data: [u8; 8], lost: bool) {
        let mut mctl = MCTL_NEW_DAT | (dlc & MCTL_DLC_MASK);
        if lost {
            mctl |= MCTL_MSG_LST;
        }
        self.with(|state| {
            state.objects[number as usize] = MessageObject {
                arb: ARB_MSG_VAL | ARB_XTD | id,
                mctl,
                data,
            };
            let index = (number - 1) as usize;
            state.new_data[index / 32] |= 1 << (index % 32);
        });
    }

    /// Receive the last committed transmit object in box `number`, as a
    /// loopback node would: same identifier, DLC, and data slots.
    pub fn loop_back_last_transmit(&self, number: u8) {
        let (_, object) = self.with(|state| *state.transmitted.last().expect("nothing transmitted"));
        let id = object.arb & ARB_ID_MASK;
        self.load_raw(number, id, object.mctl & MCTL_DLC_MASK, object.data, false);
    }

    pub fn tx_writes(&self) -> Vec<RegWrite> {
        self.with(|state| state.if1.writes.clone())
    }

    pub fn rx_writes(&self) -> Vec<RegWrite> {
        self.with(|state| state.if2.writes.clone())
    }

    pub fn has_new_data(&self, number: u8) -> bool {
        let index = (number - 1) as usize;
        self.with(|state| state.new_data[index / 32] & (1 << (index % 32)) != 0)
    }
}

impl ControllerState {
    fn interface(&mut self, set: Set) -> &mut InterfaceState {
        match set {
            Set::If1 => &mut self.if1,
            Set::If2 => &mut self.if2,
        }
    }

    /// Transfer between the interface register set and message object `number`
    /// according to the last command written.
    fn transfer(&mut self, set: Set, number: u8) {
        let index = number as usize;
        let iface = match set {
            Set::If1 => &self.if1,
            Set::If2 => &self.if2,
        };
        let cmd = iface.cmd;

        if cmd & CMD_WR != 0 {
            let (arb, mctl, data) = (iface.arb, iface.mctl, iface.data);
            let object = &mut self.objects[index];
            if cmd & CMD_ARB != 0 {
                object.arb = arb;
            }
            if cmd & CMD_CONTROL != 0 {
                object.mctl = mctl;
            }
            if cmd & CMD_DATA_A != 0 {
                object.data[..4].copy_from_slice(&data[..4]);
            }
            if cmd & CMD_DATA_B != 0 {
                object.data[4..].copy_from_slice(&data[4..]);
            }
            if cmd & CMD_TXRQST_NEWDAT != 0 {
                let committed = *object;
                self.transmitted.push((number, committed));
            }
        } else {
            let object = self.objects[index];
            let iface = self.interface(set);
            if cmd & CMD_ARB != 0 {
                iface.arb = object.arb;
            }
            if cmd & CMD_CONTROL != 0 {
                iface.mctl = object.mctl;
            }
            if cmd & CMD_DATA_A != 0 {
                iface.data[..4].copy_from_slice(&object.data[..4]);
            }
            if cmd & CMD_DATA_B != 0 {
                iface.data[4..].copy_from_slice(&object.data[4..]);
            }
            if cmd & CMD_TXRQST_NEWDAT != 0 {
                self.objects[index].mctl &= !MCTL_NEW_DAT;
                let bit = (number - 1) as usize;
                self.new_data[bit / 32] &= !(1 << (bit % 32));
            }
        }
    }
}

/// Handle on one interface register set of the simulated controller.
pub struct SimInterface {
    state: Arc<Mutex<ControllerState>>,
    set: Set,
}

impl SimInterface {
    fn with<T>(&self, f: impl FnOnce(&mut InterfaceState) -> T) -> T {
        let mut state = self.state.lock().unwrap();
        f(state.interface(self.set))
    }
}

impl InterfaceRegisters for SimInterface {
    fn status(&self) -> u8 {
        self.with(|iface| {
            iface.status_reads += 1;
            if iface.stuck {
                STAT_BUSY
            } else if iface.busy_polls > 0 {
                iface.busy_polls -= 1;
                STAT_BUSY
            } else {
                0
            }
        })
    }

    fn write_command(&mut self, command: u8) {
        self.with(|iface| {
            iface.cmd = command;
            iface.writes.push(RegWrite::Command(command));
        });
    }

    fn write_message_number(&mut self, number: u8) {
        let mut state = self.state.lock().unwrap();
        let iface = state.interface(self.set);
        iface.writes.push(RegWrite::MessageNumber(number));
        iface.busy_polls = iface.busy_after_transfer;
        state.transfer(self.set, number);
    }

    fn write_mask(&mut self, value: u32) {
        self.with(|iface| {
            iface.mask = value;
            iface.writes.push(RegWrite::Mask(value));
        });
    }

    fn write_arbitration(&mut self, value: u32) {
        self.with(|iface| {
            iface.arb = value;
            iface.writes.push(RegWrite::Arbitration(value));
        });
    }

    fn read_arbitration(&self) -> u32 {
        self.with(|iface| iface.arb)
    }

    fn write_control(&mut self, value: u32) {
        self.with(|iface| {
            iface.mctl = value;
            iface.writes.push(RegWrite::Control(value));
        });
    }

    fn read_control(&self) -> u32 {
        self.with(|iface| iface.mctl)
    }

    fn write_data(&mut self, slot: usize, byte: u8) {
        self.with(|iface| {
            iface.data[slot] = byte;
            iface.writes.push(RegWrite::Data { slot, byte });
        });
    }

    fn read_data(&self, slot: usize) -> u8 {
        self.with(|iface| iface.data[slot])
    }
}

/// Handle on the new-data bitmap of the simulated controller.
pub struct SimNewData {
    state: Arc<Mutex<ControllerState>>,
}

impl NewDataRegisters for SimNewData {
    fn new_data(&self, word: usize) -> u32 {
        let mut state = self.state.lock().unwrap();
        state.new_data_reads += 1;
        state.new_data[word]
    }
}

#[derive(Default)]
#[allow(dead_code)]
/// Sink recording every delivered frame with its loss flag.
pub struct RecordingSink {
    pub frames: Mutex<Vec<(CanFrame, bool)>>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn delivered(&self) -> Vec<(CanFrame, bool)> {
        self.frames.lock().unwrap().clone()
    }
}

impl UpstreamSink for RecordingSink {
    fn deliver(&self, frame: &CanFrame, lost: bool) -> Delivery {
        self.frames.lock().unwrap().push((*frame, lost));
        Delivery::queued(Reschedule::No)
    }
}

#[derive(Default)]
#[allow(dead_code)]
/// Registry recording registration calls, optionally refusing them.
pub struct RecordingRegistry {
    pub calls: Vec<String>,
    pub refuse: bool,
    /// MTU reported by the transmit function at registration.
    pub mtu: Option<usize>,
    /// Identifier of a frame sent through the transmit function while registering.
    pub announce: Option<u32>,
}

impl NetworkRegistry for RecordingRegistry {
    type Error = &'static str;

    fn add_interface(&mut self, name: &str, tx: &dyn FrameTransmit) -> Result<(), Self::Error> {
        if self.refuse {
            return Err("interface list full");
        }
        self.calls.push(format!("add {name}"));
        self.mtu = Some(tx.mtu());
        if let Some(raw) = self.announce {
            let id = ExtendedId::new(raw).ok_or("bad announce id")?;
            tx.transmit_frame(id, &[0xA5]).map_err(|_| "announce failed")?;
        }
        Ok(())
    }

    fn set_default_route(&mut self, name: &str) -> Result<(), Self::Error> {
        self.calls.push(format!("route {name}"));
        Ok(())
    }
}
