use crate::{
    definitions::{cpu, display, memory},
    opcode::{
        Address, Arithmetic, ArithmeticOp, ChipOpcodes, KeyOp, KeySkip, Misc, MiscOp, Operation,
        ProgramCounterStep, RegisterConst, RegisterPair, Sprite, System,
    },
    ProcessError,
};

use super::ChipSet;

impl ChipOpcodes for ChipSet {
    fn system(&mut self, op: System) -> Result<(ProgramCounterStep, Operation), ProcessError> {
        match op {
            System::Clear => {
                // 00E0
                // clear display
                for row in self.display.iter_mut() {
                    for coloumn in row.iter_mut() {
                        *coloumn = false;
                    }
                }
                self.redraw = true;
                Ok((ProgramCounterStep::Next, Operation::Draw))
            }
            System::Return => {
                // 00EE
                // Return from sub routine => pop from stack
                let pc = self.pop_stack()?;
                log::debug!("return to {:#05X}", pc);
                Ok((ProgramCounterStep::Jump(pc), Operation::None))
            }
        }
    }

    fn jump(&self, nnn: Address) -> Result<ProgramCounterStep, ProcessError> {
        // 1NNN
        Ok(ProgramCounterStep::Jump(nnn))
    }

    fn call(&mut self, nnn: Address) -> Result<ProgramCounterStep, ProcessError> {
        // 2NNN
        // the stack keeps the address of the instruction after the call
        let next = self.address(self.program_counter as usize, memory::opcodes::SIZE)?;
        self.push_stack(next as Address)?;
        log::debug!("call {:#05X}, depth {}", nnn, self.stack.len());
        Ok(ProgramCounterStep::Jump(nnn))
    }

    fn skip_if_equal(&self, op: RegisterConst) -> Result<ProgramCounterStep, ProcessError> {
        // 3XNN
        Ok(ProgramCounterStep::cond(self.registers[op.x] == op.nn))
    }

    fn skip_if_not_equal(&self, op: RegisterConst) -> Result<ProgramCounterStep, ProcessError> {
        // 4XNN
        Ok(ProgramCounterStep::cond(self.registers[op.x] != op.nn))
    }

    fn skip_if_registers_equal(
        &self,
        op: RegisterPair,
    ) -> Result<ProgramCounterStep, ProcessError> {
        // 5XY0
        Ok(ProgramCounterStep::cond(
            self.registers[op.x] == self.registers[op.y],
        ))
    }

    fn load(&mut self, op: RegisterConst) -> Result<ProgramCounterStep, ProcessError> {
        // 6XNN
        self.registers[op.x] = op.nn;
        Ok(ProgramCounterStep::Next)
    }

    fn add(&mut self, op: RegisterConst) -> Result<ProgramCounterStep, ProcessError> {
        // 7XNN
        // the carry flag stays untouched
        self.registers[op.x] = self.registers[op.x].wrapping_add(op.nn);
        Ok(ProgramCounterStep::Next)
    }

    fn arithmetic(&mut self, op: Arithmetic) -> Result<ProgramCounterStep, ProcessError> {
        let (vx, vy) = (self.registers[op.x], self.registers[op.y]);

        // The flag is written before the result, so for `X == F` the result wins.
        let (flag, value) = match op.op {
            ArithmeticOp::Assign => (None, vy),
            ArithmeticOp::Or => (None, vx | vy),
            ArithmeticOp::And => (None, vx & vy),
            ArithmeticOp::Xor => (None, vx ^ vy),
            ArithmeticOp::Add => {
                let (value, carry) = vx.overflowing_add(vy);
                (Some(carry as u8), value)
            }
            ArithmeticOp::Sub => (Some((vx >= vy) as u8), vx.wrapping_sub(vy)),
            ArithmeticOp::ShiftRight => (Some(vx & 0x1), vx >> 1),
            ArithmeticOp::SubReverse => (Some((vy >= vx) as u8), vy.wrapping_sub(vx)),
            ArithmeticOp::ShiftLeft => (Some(vx >> 7), vx << 1),
        };

        if let Some(flag) = flag {
            self.registers[cpu::register::LAST] = flag;
        }
        self.registers[op.x] = value;

        Ok(ProgramCounterStep::Next)
    }

    fn skip_if_registers_not_equal(
        &self,
        op: RegisterPair,
    ) -> Result<ProgramCounterStep, ProcessError> {
        // 9XY0
        Ok(ProgramCounterStep::cond(
            self.registers[op.x] != self.registers[op.y],
        ))
    }

    fn set_index(&mut self, nnn: Address) -> Result<ProgramCounterStep, ProcessError> {
        // ANNN
        self.index_register = nnn;
        Ok(ProgramCounterStep::Next)
    }

    fn jump_offset(&self, nnn: Address) -> Result<ProgramCounterStep, ProcessError> {
        // BNNN
        let target = self.address(nnn as usize, self.registers[0] as usize)?;
        Ok(ProgramCounterStep::Jump(target as Address))
    }

    fn random(&mut self, op: RegisterConst) -> Result<ProgramCounterStep, ProcessError> {
        // CXNN
        let mut byte = [0u8; 1];
        self.rng.fill_bytes(&mut byte);
        self.registers[op.x] = byte[0] & op.nn;
        Ok(ProgramCounterStep::Next)
    }

    fn draw(&mut self, op: Sprite) -> Result<(ProgramCounterStep, Operation), ProcessError> {
        // DXYN
        // Each row of 8 pixels is read as bit-coded starting from memory location I. Pixels that
        // are set flip the screen pixel, a flip from set to unset is a collision.
        let x = self.registers[op.x] as usize;
        let y = self.registers[op.y] as usize;

        let rows = self.addresses(self.index_register as usize, op.n)?;

        self.registers[cpu::register::LAST] = 0;
        let mut collision = false;

        for (offset, address) in rows.into_iter().enumerate() {
            let sprite_row = self.memory[address];
            let row = (y + offset) % display::HEIGHT;

            for bit in 0..8 {
                if sprite_row & (0x80 >> bit) == 0 {
                    continue;
                }

                let pixel = &mut self.display[row][(x + bit) % display::WIDTH];
                collision |= *pixel;
                *pixel = !*pixel;
            }
        }

        self.registers[cpu::register::LAST] = collision as u8;
        self.redraw = true;

        Ok((ProgramCounterStep::Next, Operation::Draw))
    }

    fn key_skip(&self, op: KeySkip) -> Result<ProgramCounterStep, ProcessError> {
        // only the low nibble names a key
        let key = (self.registers[op.x] & 0xF) as usize;
        let pressed = self.keyboard.is_pressed(key);

        let skip = match op.op {
            // EX9E
            KeyOp::Pressed => pressed,
            // EXA1
            KeyOp::Released => !pressed,
        };
        Ok(ProgramCounterStep::cond(skip))
    }

    fn misc(&mut self, op: Misc) -> Result<(ProgramCounterStep, Operation), ProcessError> {
        let x = op.x;
        let base = self.index_register as usize;

        match op.op {
            MiscOp::GetDelayTimer => {
                self.registers[x] = self.timers.delay.get_value();
            }
            MiscOp::AwaitKeyPress => {
                if self.waiting.is_none() {
                    // only presses after this point count
                    self.waiting = Some(x);
                    self.keyboard.clear_press();
                }

                if !self.take_awaited_key() {
                    return Ok((ProgramCounterStep::None, Operation::Wait));
                }
            }
            MiscOp::SetDelayTimer => {
                self.timers.delay.set_value(self.registers[x]);
            }
            MiscOp::SetSoundTimer => {
                self.timers.sound.set_value(self.registers[x]);
            }
            MiscOp::AddToIndex => {
                self.index_register = self
                    .index_register
                    .wrapping_add(self.registers[x] as Address);
            }
            MiscOp::FontGlyph => {
                let glyph = (self.registers[x] & 0xF) as usize;
                self.index_register = (display::fontset::LOCATION
                    + glyph * display::fontset::GLYPH_SIZE)
                    as Address;
            }
            MiscOp::StoreBcd => {
                let addresses = self.addresses(base, 3)?;
                let value = self.registers[x];
                let digits = [value / 100, (value / 10) % 10, value % 10];
                for (address, digit) in addresses.into_iter().zip(digits.iter()) {
                    self.memory[address] = *digit;
                }
            }
            MiscOp::StoreRegisters => {
                let addresses = self.addresses(base, x + 1)?;
                for (register, address) in addresses.into_iter().enumerate() {
                    self.memory[address] = self.registers[register];
                }
            }
            MiscOp::LoadRegisters => {
                let addresses = self.addresses(base, x + 1)?;
                for (register, address) in addresses.into_iter().enumerate() {
                    self.registers[register] = self.memory[address];
                }
            }
        }

        Ok((ProgramCounterStep::Next, Operation::None))
    }
}
